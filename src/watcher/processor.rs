//! Event processing: registry maintenance and command dispatch

use std::ffi::OsStr;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{AutorunError, AutorunResult};
use crate::runner::CommandRunner;
use crate::screen::DisplayReset;

use super::event::RawEvent;
use super::mux::Ready;
use super::registry::WatchRegistry;
use super::source::NotifySource;
use super::tree;

/// Handles every readiness signal from the multiplexer
pub struct EventProcessor<'a, S, R, D>
where
    S: NotifySource,
{
    registry: &'a mut WatchRegistry<S>,
    command: &'a str,
    runner: R,
    display: D,
}

impl<'a, S, R, D> EventProcessor<'a, S, R, D>
where
    S: NotifySource,
    R: CommandRunner,
    D: DisplayReset,
{
    pub fn new(
        registry: &'a mut WatchRegistry<S>,
        command: &'a str,
        runner: R,
        display: D,
    ) -> Self {
        Self {
            registry,
            command,
            runner,
            display,
        }
    }

    /// Multiplexer handler.
    ///
    /// Breaks with the read error when the notification descriptor cannot be
    /// read; every other outcome keeps the loop running.
    pub fn on_ready(&mut self, ready: &[Ready]) -> ControlFlow<AutorunResult<()>> {
        let descriptor = self.registry.descriptor();

        for signal in ready.iter().filter(|signal| signal.fd == descriptor) {
            let batch = match self.registry.read_events() {
                Ok(batch) => batch,
                Err(errno) => return ControlFlow::Break(Err(AutorunError::Read(errno))),
            };
            debug!(fd = signal.fd, records = batch.len(), "read");
            self.process_batch(batch);
        }

        ControlFlow::Continue(())
    }

    /// Maintain the registry for every record, then run the command once.
    pub fn process_batch(&mut self, batch: Vec<RawEvent<S::Handle>>) {
        if batch.is_empty() {
            return;
        }

        for event in &batch {
            self.maintain(event);
        }

        self.trigger();
    }

    fn maintain(&mut self, event: &RawEvent<S::Handle>) {
        let kind = event.kind();

        if event.mask.is_overflow() {
            warn!("event queue overflowed, some changes were not reported");
            return;
        }

        let Some(path) = self.registry.resolve(event.handle).map(Path::to_path_buf) else {
            debug!(kind = %kind, handle = ?event.handle, "event for a stale watch");
            return;
        };

        debug!(
            kind = %kind,
            path = %display_path(&path, event.name.as_deref()).display(),
            "decoded"
        );

        if event.mask.is_forced_removal() {
            self.rearm(event.handle, path);
            return;
        }

        if event.mask.is_new_directory() {
            if let Some(name) = &event.name {
                self.grow(&path, name);
            }
        }
    }

    /// Re-register a path whose watch the kernel dropped.
    fn rearm(&mut self, stale: S::Handle, path: PathBuf) {
        match self.registry.add_watch(&path) {
            Ok(handle) => {
                if handle != stale {
                    self.registry.retire(stale);
                }
                info!(path = %path.display(), "watch re-armed");
            }
            Err(err) => {
                self.registry.retire(stale);
                warn!("{err}, {} is no longer watched", path.display());
            }
        }
    }

    /// Watch a directory that appeared after the initial walk.
    fn grow(&mut self, parent: &Path, name: &OsStr) {
        let child = parent.join(name);
        match tree::watch_tree(self.registry, &child) {
            Ok(report) => debug!(
                path = %child.display(),
                registered = report.registered,
                "watching new directory"
            ),
            Err(err) => warn!("{err}, new directory left unwatched"),
        }
    }

    fn trigger(&mut self) {
        self.display.reset();
        self.runner.run(self.command);
    }
}

fn display_path(path: &Path, name: Option<&OsStr>) -> PathBuf {
    match name {
        Some(name) => path.join(name),
        None => path.to_path_buf(),
    }
}
