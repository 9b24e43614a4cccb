//! Self-contained HTML report for an aligned capture.
//!
//! The page embeds the whole [`SeriesSet`] as JSON and draws it with ECharts
//! loaded from a CDN. Nothing here reads the capture itself.

mod error;
mod page;

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::series::SeriesSet;

pub use error::{ReportError, Result};

pub const DEFAULT_TITLE: &str = "Threaded Top Report";
pub const DEFAULT_ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js";

/// Everything on the page that does not come from the series.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    /// Free text supplied by the user, shown under the title.
    pub metadata: String,
    pub file_name: String,
    /// Hex SHA-256 of the capture.
    pub file_hash: String,
    pub app_version: String,
    pub echarts_url: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            metadata: String::new(),
            file_name: String::new(),
            file_hash: String::new(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            echarts_url: DEFAULT_ECHARTS_URL.to_string(),
        }
    }
}

impl ReportOptions {
    pub fn short_hash(&self) -> &str {
        self.file_hash.get(..6).unwrap_or(&self.file_hash)
    }
}

pub fn render(series: &SeriesSet, options: &ReportOptions) -> Result<String> {
    let data = script_json(series)?;
    let html = page::build(series, options, &data);
    info!(
        bytes = html.len(),
        title = %options.title,
        snapshots = series.len(),
        "report rendered"
    );
    Ok(html)
}

/// Write `html` to `path`, creating missing parent directories.
pub fn write_report(path: &Path, html: &str) -> Result<()> {
    let path = sanitize_path(path)?;
    ensure_parent_dir(&path)?;
    fs::write(&path, html)?;
    Ok(())
}

/// Normalise `path` and reject anything that climbs with `..`.
pub fn sanitize_path(path: &Path) -> Result<PathBuf> {
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(ReportError::InvalidPath(path.display().to_string()));
    }
    let cleaned: PathBuf = path
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    if cleaned.as_os_str().is_empty() {
        return Err(ReportError::InvalidPath(path.display().to_string()));
    }
    Ok(cleaned)
}

/// Hex SHA-256 of the raw capture, shown on the page to identify the source.
pub fn file_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// JSON that is safe inside a `<script>` element. `<`, `>` and `&` can only
/// occur inside JSON strings, where the `\u` escapes mean the same thing.
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
