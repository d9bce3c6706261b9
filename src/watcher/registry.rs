//! Watch registry: handle -> path bookkeeping over a notification source

use std::collections::HashMap;
use std::os::fd::{AsFd, BorrowedFd, RawFd};
use std::path::{Path, PathBuf};

use nix::errno::Errno;
use tracing::{debug, warn};

use crate::error::{AutorunError, AutorunResult};

use super::event::RawEvent;
use super::source::{Inotify, NotifySource};

/// Maps live watch handles to the paths they were registered for
///
/// Owns the notification source. Not shared across threads.
pub struct WatchRegistry<S: NotifySource = Inotify> {
    source: S,
    watches: HashMap<S::Handle, PathBuf>,
}

impl WatchRegistry<Inotify> {
    /// Allocate an inotify-backed registry.
    pub fn open() -> AutorunResult<Self> {
        Ok(Self::with_source(Inotify::open()?))
    }
}

/// Lets the registry itself be registered with the multiplexer.
impl AsFd for WatchRegistry<Inotify> {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.source.as_fd()
    }
}

impl<S: NotifySource> WatchRegistry<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            watches: HashMap::new(),
        }
    }

    /// Register `path` and record the returned handle.
    ///
    /// The registry does not de-duplicate by path. If the source hands back a
    /// handle that is already tracked, its record is replaced.
    pub fn add_watch(&mut self, path: impl AsRef<Path>) -> AutorunResult<S::Handle> {
        let path = path.as_ref();
        let handle = self
            .source
            .add_watch(path)
            .map_err(|source| AutorunError::AddWatch {
                path: path.to_path_buf(),
                source,
            })?;
        self.watches.insert(handle, path.to_path_buf());
        Ok(handle)
    }

    /// Path a handle was registered for; `None` once the handle is stale.
    pub fn resolve(&self, handle: S::Handle) -> Option<&Path> {
        self.watches.get(&handle).map(PathBuf::as_path)
    }

    /// Forget a handle the kernel has already dropped.
    pub fn retire(&mut self, handle: S::Handle) -> Option<PathBuf> {
        self.watches.remove(&handle)
    }

    /// Descriptor to hand to the event multiplexer.
    pub fn descriptor(&self) -> RawFd {
        self.source.raw_fd()
    }

    pub fn read_events(&mut self) -> Result<Vec<RawEvent<S::Handle>>, Errno> {
        self.source.read_events()
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// Every handle currently registered for `path`.
    pub fn handles_for(&self, path: &Path) -> Vec<S::Handle> {
        self.watches
            .iter()
            .filter(|(_, watched)| watched.as_path() == path)
            .map(|(handle, _)| *handle)
            .collect()
    }

    pub fn is_watched(&self, path: &Path) -> bool {
        self.watches.values().any(|watched| watched == path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.watches.values().map(PathBuf::as_path)
    }

    /// Release every tracked handle, then the descriptor.
    ///
    /// Individual release failures are logged and skipped. A failure to close
    /// the descriptor is returned.
    pub fn close(self) -> AutorunResult<()> {
        let Self {
            mut source,
            watches,
        } = self;

        for (handle, path) in watches {
            match source.remove_watch(handle) {
                Ok(()) => debug!(path = %path.display(), "released watch"),
                Err(err) => warn!(path = %path.display(), "rm_watch: {err}"),
            }
        }

        source.close().map_err(AutorunError::Close)
    }
}
