//! Configuration module for autorun
//!
//! Settings precedence:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (AUTORUN_*)
//! 3. `--config <PATH>`, else `./.autorun.toml`
//! 4. User config (~/.config/autorun/config.toml)
//! 5. Built-in defaults (lowest priority)
//!
//! Watch targets and the command itself only come from the command line.

mod loader;
mod types;

pub use loader::{
    load_with_warnings, resolve, with_env_overrides, ConfigWarning, LoadedConfig, LOCAL_CONFIG,
};
pub use types::{ClearMode, Config, DisplayConfig, LoggingConfig};
