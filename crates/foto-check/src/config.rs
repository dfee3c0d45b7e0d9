use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default = "default_policy_file")]
    pub policy_file: PathBuf,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            policy_file: default_policy_file(),
            logging: LoggingConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_dir")]
    pub dir: PathBuf,
    /// Ask after each check whether to write the HTML report.
    #[serde(default = "default_true")]
    pub prompt: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: default_report_dir(),
            prompt: default_true(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default-value functions used by serde
// ---------------------------------------------------------------------------

fn default_policy_file() -> PathBuf {
    PathBuf::from("config.json")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_report_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Load settings from a YAML file.
///
/// Returns `Ok(None)` when the file does not exist, so the tool can run next
/// to a bare `config.json`. The caller decides how to report that.
pub fn load(path: &Path) -> Result<Option<Settings>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file: {}", path.display()))?;
    let settings = serde_yml::from_str(&contents)
        .with_context(|| format!("failed to parse settings file: {}", path.display()))?;
    Ok(Some(settings))
}
