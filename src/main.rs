use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use ttop::capture::SnapshotParser;
use ttop::config::{Config, load_config, load_config_from_path};
use ttop::format::process_summary;
use ttop::logging::init_logging;
use ttop::report::{self, ReportOptions};
use ttop::series::align;

#[derive(Parser)]
#[command(
    name = "ttop",
    version,
    about = "Render a captured `top -H -b` session as an HTML time-series report"
)]
struct Cli {
    /// Captured top output to read
    input: PathBuf,

    /// Output HTML file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report title
    #[arg(short = 'n', long = "name")]
    title: Option<String>,

    /// Free-text metadata shown under the title
    #[arg(short, long, default_value = "")]
    metadata: String,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level for diagnostics on stderr (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit diagnostics as JSON lines
    #[arg(long, default_value_t = false)]
    log_json: bool,

    /// Print a per-process peak CPU table to stdout
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    init_logging(&config.logging.level, config.logging.json)?;

    run(&cli, &config)
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let input = report::sanitize_path(&cli.input)
        .map_err(|_| eyre!("invalid input path: {}", cli.input.display()))?;
    let raw = std::fs::read(&input)
        .wrap_err_with(|| format!("error reading input file {}", input.display()))?;

    let parsed = SnapshotParser::new()
        .parse(&raw)
        .wrap_err("error parsing top output")?;
    let series = align(&parsed);

    let options = ReportOptions {
        title: config.general.title.clone(),
        metadata: cli.metadata.clone(),
        file_name: file_name(&input),
        file_hash: report::file_digest(&raw),
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        echarts_url: config.report.echarts_url.clone(),
    };
    let html = report::render(&series, &options).wrap_err("error generating report")?;
    report::write_report(&config.general.output, &html)
        .wrap_err_with(|| format!("error writing {}", config.general.output.display()))?;

    if cli.summary {
        print!(
            "{}",
            process_summary(&series.processes, config.report.label_width)
        );
    }
    println!(
        "report '{}' written to {}",
        options.title,
        config.general.output.display()
    );
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref output) = cli.output {
        config.general.output = output.clone();
    }
    if let Some(ref title) = cli.title {
        config.general.title = title.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.log_json {
        config.logging.json = true;
    }

    config
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
