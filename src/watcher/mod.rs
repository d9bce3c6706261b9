//! Change notification engine
//!
//! - `registry`: watch handle to path mapping over the notification source
//! - `tree`: initial recursive registration
//! - `mux`: epoll readiness loop
//! - `processor`: registry maintenance and command dispatch
//! - `run`: the `watch` entry point tying them together

mod event;
mod mux;
mod processor;
mod registry;
mod run;
mod source;
#[cfg(test)]
mod testing;
mod tree;

pub use event::{EventKind, EventMask, RawEvent};
pub use mux::{Multiplexer, Ready};
pub use processor::EventProcessor;
pub use registry::WatchRegistry;
pub use run::{register_targets, watch, WatchOptions};
pub use source::{Inotify, NotifySource};
pub use tree::{watch_files, watch_tree, watch_trees, WalkReport};
