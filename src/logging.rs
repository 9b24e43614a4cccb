//! Diagnostic output for the binary.
//!
//! The library only emits `tracing` events. Skipped capture lines are `warn`,
//! parse and render summaries are `debug`/`info`. Everything goes to stderr so
//! stdout stays clean for `--summary`.

use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("ttop={level}")))
        .map_err(|e| eyre!("invalid log level `{level}`: {e}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}
