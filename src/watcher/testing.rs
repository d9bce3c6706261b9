//! In-memory notification source for unit tests

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::os::fd::RawFd;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use nix::errno::Errno;

use super::event::{EventMask, RawEvent};
use super::source::NotifySource;
use crate::runner::CommandRunner;
use crate::screen::DisplayReset;

pub(crate) const FAKE_FD: RawFd = 1000;

#[derive(Default)]
struct State {
    next: u32,
    coalesce: bool,
    issued: HashMap<PathBuf, u32>,
    rejected: HashMap<PathBuf, Errno>,
    fail_removals: Option<Errno>,
    fail_close: Option<Errno>,
    batches: VecDeque<Result<Vec<RawEvent<u32>>, Errno>>,
    added: Vec<PathBuf>,
    removed: Vec<u32>,
    closed: bool,
}

/// Clones share state, so a test keeps one clone to steer the source after
/// handing the other to a registry.
#[derive(Clone, Default)]
pub(crate) struct FakeSource {
    state: Rc<RefCell<State>>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make `add_watch(path)` fail with `errno` until `accept` is called.
    pub(crate) fn reject(&self, path: impl AsRef<Path>, errno: Errno) {
        self.state
            .borrow_mut()
            .rejected
            .insert(path.as_ref().to_path_buf(), errno);
    }

    pub(crate) fn accept(&self, path: impl AsRef<Path>) {
        self.state.borrow_mut().rejected.remove(path.as_ref());
    }

    /// Return the same handle for repeated registrations of one path.
    pub(crate) fn coalesce(&self, enabled: bool) {
        self.state.borrow_mut().coalesce = enabled;
    }

    pub(crate) fn fail_removals(&self, errno: Errno) {
        self.state.borrow_mut().fail_removals = Some(errno);
    }

    pub(crate) fn fail_close(&self, errno: Errno) {
        self.state.borrow_mut().fail_close = Some(errno);
    }

    pub(crate) fn push_batch(&self, batch: Vec<RawEvent<u32>>) {
        self.state.borrow_mut().batches.push_back(Ok(batch));
    }

    pub(crate) fn push_read_error(&self, errno: Errno) {
        self.state.borrow_mut().batches.push_back(Err(errno));
    }

    /// Paths passed to `add_watch`, in call order, including rejected ones.
    pub(crate) fn added(&self) -> Vec<PathBuf> {
        self.state.borrow().added.clone()
    }

    pub(crate) fn removed(&self) -> Vec<u32> {
        self.state.borrow().removed.clone()
    }

    pub(crate) fn closed(&self) -> bool {
        self.state.borrow().closed
    }
}

impl NotifySource for FakeSource {
    type Handle = u32;

    fn add_watch(&mut self, path: &Path) -> Result<u32, Errno> {
        let mut state = self.state.borrow_mut();
        state.added.push(path.to_path_buf());
        if let Some(errno) = state.rejected.get(path) {
            return Err(*errno);
        }
        if state.coalesce {
            if let Some(handle) = state.issued.get(path) {
                return Ok(*handle);
            }
        }
        state.next += 1;
        let handle = state.next;
        state.issued.insert(path.to_path_buf(), handle);
        Ok(handle)
    }

    fn remove_watch(&mut self, handle: u32) -> Result<(), Errno> {
        let mut state = self.state.borrow_mut();
        if let Some(errno) = state.fail_removals {
            return Err(errno);
        }
        state.removed.push(handle);
        Ok(())
    }

    fn read_events(&mut self) -> Result<Vec<RawEvent<u32>>, Errno> {
        self.state
            .borrow_mut()
            .batches
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn raw_fd(&self) -> RawFd {
        FAKE_FD
    }

    fn close(self) -> Result<(), Errno> {
        let mut state = self.state.borrow_mut();
        state.closed = true;
        match state.fail_close {
            Some(errno) => Err(errno),
            None => Ok(()),
        }
    }
}

/// Shorthand for a record with an entry name.
pub(crate) fn named(handle: u32, mask: EventMask, name: &str) -> RawEvent<u32> {
    RawEvent::new(handle, mask).with_name(name)
}

/// Records every command instead of running it.
#[derive(Debug, Default)]
pub(crate) struct RecordingRunner {
    pub(crate) commands: Vec<String>,
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }
}

#[derive(Debug, Default)]
pub(crate) struct CountingDisplay {
    pub(crate) resets: usize,
}

impl DisplayReset for CountingDisplay {
    fn reset(&mut self) {
        self.resets += 1;
    }
}
