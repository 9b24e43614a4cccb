use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::report::{DEFAULT_ECHARTS_URL, DEFAULT_TITLE};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub output: PathBuf,
    pub title: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            output: PathBuf::from("ttop.html"),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub echarts_url: String,
    /// Display width of process labels in the `--summary` table.
    pub label_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            echarts_url: DEFAULT_ECHARTS_URL.to_string(),
            label_width: 48,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
            json: false,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ttop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.output, PathBuf::from("ttop.html"));
        assert_eq!(config.general.title, "Threaded Top Report");
        assert_eq!(config.report.label_width, 48);
        assert!(config.report.echarts_url.starts_with("https://"));
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.json);
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
title = "Nightly load test"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.title, "Nightly load test");
        // Other fields should be defaults
        assert_eq!(config.general.output, PathBuf::from("ttop.html"));
        assert_eq!(config.report.label_width, 48);
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
output = "reports/out.html"
title = "Capture"

[report]
echarts_url = "echarts.min.js"
label_width = 30

[logging]
level = "debug"
json = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.output, PathBuf::from("reports/out.html"));
        assert_eq!(config.general.title, "Capture");
        assert_eq!(config.report.echarts_url, "echarts.min.js");
        assert_eq!(config.report.label_width, 30);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.title, "Threaded Top Report");
    }

    #[test]
    fn invalid_toml_returns_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(file.path());
        assert_eq!(config.report.label_width, 48);
    }

    #[test]
    fn config_file_on_disk_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[logging]\nlevel = \"info\"\n").unwrap();
        let config = load_config_from_path(file.path());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.general.title, "Threaded Top Report");
    }
}
