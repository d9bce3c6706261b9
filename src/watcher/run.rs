//! Top-level watch loop

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::AutorunResult;
use crate::fs::{require_dir, require_file};
use crate::runner::CommandRunner;
use crate::screen::DisplayReset;

use super::mux::Multiplexer;
use super::processor::EventProcessor;
use super::registry::WatchRegistry;
use super::source::NotifySource;
use super::tree;

/// What to watch and what to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    /// Watched individually
    pub files: Vec<PathBuf>,
    /// Watched recursively
    pub dirs: Vec<PathBuf>,
    /// Shell command line run after every drained batch
    pub command: String,
}

impl WatchOptions {
    /// With no files and no directories, the current directory is watched.
    pub fn new(files: Vec<PathBuf>, mut dirs: Vec<PathBuf>, command: impl Into<String>) -> Self {
        if files.is_empty() && dirs.is_empty() {
            dirs.push(PathBuf::from("."));
        }
        Self {
            files,
            dirs,
            command: command.into(),
        }
    }

    /// Check every file target is a regular file and every directory target
    /// a directory.
    pub fn validate(&self) -> AutorunResult<()> {
        for file in &self.files {
            require_file(file)?;
        }
        for dir in &self.dirs {
            require_dir(dir)?;
        }
        Ok(())
    }
}

/// Register every target: files first, then each directory tree.
pub fn register_targets<S: NotifySource>(
    registry: &mut WatchRegistry<S>,
    options: &WatchOptions,
) -> AutorunResult<()> {
    tree::watch_files(registry, &options.files)?;
    let report = tree::watch_trees(registry, &options.dirs)?;
    debug!(
        files = options.files.len(),
        entries = report.registered,
        watches = registry.len(),
        "targets registered"
    );
    Ok(())
}

/// Watch the targets and run the command on every change.
///
/// Returns only on a fatal setup or loop error. The registry is closed on
/// the way out; a close failure is logged and the loop's own result wins.
pub fn watch<R, D>(options: &WatchOptions, runner: R, mut display: D) -> AutorunResult<()>
where
    R: CommandRunner,
    D: DisplayReset,
{
    options.validate()?;

    let mut registry = WatchRegistry::open()?;
    register_targets(&mut registry, options)?;

    let mux = Multiplexer::new()?;
    mux.register(&registry)?;

    display.reset();

    let outcome = {
        let mut processor = EventProcessor::new(&mut registry, &options.command, runner, display);
        mux.run(|ready| processor.on_ready(ready))
    };

    if let Err(err) = registry.close() {
        warn!("{err}");
    }

    outcome
}
