//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AutorunError, AutorunResult};

use super::types::{ClearMode, Config};

/// Settings file looked up in the working directory
pub const LOCAL_CONFIG: &str = ".autorun.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> AutorunResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| AutorunError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| ConfigWarning {
            key,
            file: path.to_path_buf(),
        })
        .collect();

    Ok((config, warnings))
}

/// A loaded configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// `None` when built-in defaults were used
    pub source: Option<PathBuf>,
}

/// Find and load settings.
///
/// Lookup order: `explicit` (must exist), `<cwd>/.autorun.toml`,
/// `<config_dir>/autorun/config.toml`, then built-in defaults.
pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> AutorunResult<LoadedConfig> {
    resolve_with(explicit, cwd, dirs::config_dir())
}

pub(crate) fn resolve_with(
    explicit: Option<&Path>,
    cwd: &Path,
    user_config_dir: Option<PathBuf>,
) -> AutorunResult<LoadedConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(AutorunError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        return load_from(path);
    }

    let local = cwd.join(LOCAL_CONFIG);
    if local.exists() {
        return load_from(&local);
    }

    if let Some(dir) = user_config_dir {
        let user = dir.join("autorun/config.toml");
        if user.exists() {
            return load_from(&user);
        }
    }

    Ok(LoadedConfig::default())
}

fn load_from(path: &Path) -> AutorunResult<LoadedConfig> {
    let (config, warnings) = load_with_warnings(path)?;
    Ok(LoadedConfig {
        config,
        warnings,
        source: Some(path.to_path_buf()),
    })
}

/// Apply environment variable overrides (AUTORUN_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // AUTORUN_SHELL
    if let Some(shell) = get_env("AUTORUN_SHELL").filter(|s| !s.trim().is_empty()) {
        config.shell = PathBuf::from(shell);
    }

    // AUTORUN_CLEAR (auto|always|never)
    if let Some(mode) = get_env("AUTORUN_CLEAR").as_deref().and_then(ClearMode::parse) {
        config.display.clear = mode;
    }

    // AUTORUN_LOG
    if let Some(level) = get_env("AUTORUN_LOG").filter(|s| !s.trim().is_empty()) {
        config.logging.level = level;
    }

    config
}
