// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration handling for designbot

use crate::builder::BuilderConfig;
use crate::error::{DesignbotError, Result};
use crate::report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Tree builder settings
    #[serde(default)]
    pub builder: BuilderConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,

    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Directory names skipped when scanning
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            builder: BuilderConfig::default(),
            log: LogConfig::default(),
            report: ReportConfig::default(),
            exclude: default_exclude(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level used when `--verbose` is not given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output format: text, json or sarif
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl ReportConfig {
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.format.parse().map_err(DesignbotError::Config)
    }
}

fn default_format() -> String {
    "text".to_string()
}

fn default_exclude() -> Vec<String> {
    vec![
        ".git".to_string(),
        "node_modules".to_string(),
        "target".to_string(),
        "dist".to_string(),
        "build".to_string(),
    ]
}

/// Load configuration, falling back to defaults when `path` does not exist.
///
/// `.toml` files are parsed as TOML, anything else as YAML.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::from_str(&content)
            .map_err(|e| DesignbotError::Config(format!("TOML parse error: {}", e)))?
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| DesignbotError::Config(format!("YAML parse error: {}", e)))?
    };

    config.report.output_format()?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}
