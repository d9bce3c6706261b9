//! autorun - run a command whenever watched files change
//!
//! Watches files and directory trees through inotify, waits on epoll and
//! runs a shell command once per batch of change notifications. Directories
//! created after startup are picked up automatically, and watches the
//! kernel drops are re-armed.

pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod runner;
pub mod screen;
pub mod watcher;

// Re-exports for convenience
pub use config::{ClearMode, Config};
pub use error::{AutorunError, AutorunResult};
pub use runner::{CommandRunner, ShellRunner};
pub use screen::{DisplayReset, Screen};
pub use watcher::{watch, WatchOptions, WatchRegistry};
