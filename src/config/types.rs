//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AutorunResult;
use crate::runner::DEFAULT_SHELL;

use super::loader::{self, ConfigWarning};

/// When to clear the terminal before a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearMode {
    /// Clear only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ClearMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(ClearMode::Auto),
            "always" | "yes" | "true" => Some(ClearMode::Always),
            "never" | "no" | "false" => Some(ClearMode::Never),
            _ => None,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub clear: ClearMode,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `warn` or `autorun=debug`
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

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_shell() -> PathBuf {
    PathBuf::from(DEFAULT_SHELL)
}

/// Settings file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Shell used as `<shell> -c <command>`
    #[serde(default = "default_shell")]
    pub shell: PathBuf,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load a settings file, discarding unknown-key warnings.
    pub fn load(path: &Path) -> AutorunResult<Self> {
        loader::load_with_warnings(path).map(|(config, _)| config)
    }

    pub fn load_with_warnings(path: &Path) -> AutorunResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }
}
