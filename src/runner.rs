//! Command execution

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, error};

/// Default shell used to interpret the command line
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Runs the configured command line
///
/// The outcome is never reported back to the caller: a failing command does
/// not change what the watcher does next.
pub trait CommandRunner {
    fn run(&mut self, command: &str);
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, command: &str) {
        (**self).run(command);
    }
}

/// Runs `<shell> -c <command>` with inherited stdio and waits for it.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: PathBuf,
}

impl ShellRunner {
    pub fn new(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &std::path::Path {
        &self.shell
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, command: &str) {
        match Command::new(&self.shell).arg("-c").arg(command).status() {
            Ok(status) => debug!(%status, command, "command finished"),
            Err(err) => error!(shell = %self.shell.display(), "{err}"),
        }
    }
}
