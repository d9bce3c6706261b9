use anyhow::Result;
use is_terminal::IsTerminal;
use tracing::{debug, warn};

use autorun::config::{self, ClearMode, Config, LoadedConfig};
use autorun::watcher::{watch, WatchOptions};
use autorun::{logging, Screen, ShellRunner};

use crate::cli::Cli;

pub fn cmd_watch(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let loaded = config::resolve(cli.config.as_deref(), &cwd)?;
    let config = effective_config(&cli, &loaded);

    logging::init(&config.logging.level);
    report_config(&loaded);

    let options = WatchOptions::new(cli.files.clone(), cli.dirs.clone(), cli.command_line());
    debug!(
        files = ?options.files,
        dirs = ?options.dirs,
        command = %options.command,
        shell = %config.shell.display(),
        "starting"
    );

    let runner = ShellRunner::new(config.shell.clone());
    let screen = Screen::for_mode(config.display.clear, std::io::stdout().is_terminal());

    watch(&options, runner, screen)?;
    Ok(())
}

/// File settings, then environment overrides, then CLI flags.
fn effective_config(cli: &Cli, loaded: &LoadedConfig) -> Config {
    let mut config = config::with_env_overrides(loaded.config.clone());

    if cli.debug {
        config.logging.level = "debug".to_string();
        config.display.clear = ClearMode::Never;
    }
    if cli.no_clear {
        config.display.clear = ClearMode::Never;
    }

    config
}

fn report_config(loaded: &LoadedConfig) {
    if let Some(source) = &loaded.source {
        debug!(path = %source.display(), "config loaded");
    }
    for warning in &loaded.warnings {
        warn!(
            "unknown config key `{}` in {}",
            warning.key,
            warning.file.display()
        );
    }
}
