//! Notification source port and its inotify implementation

use std::fmt::Debug;
use std::hash::Hash;
use std::mem::ManuallyDrop;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, RawFd};
use std::path::Path;

use nix::errno::Errno;
use nix::sys::inotify::{self, AddWatchFlags, InitFlags, WatchDescriptor};

use crate::error::{AutorunError, AutorunResult};

use super::event::{EventMask, RawEvent};

/// A kernel change-notification mechanism
///
/// Implementations:
/// - `Inotify` - Linux inotify instance
/// - test doubles that replay synthetic event batches
pub trait NotifySource {
    /// Opaque watch identifier issued by the source
    type Handle: Copy + Eq + Hash + Debug;

    /// Subscribe to create, delete, move, and modify events on `path`.
    fn add_watch(&mut self, path: &Path) -> Result<Self::Handle, Errno>;

    /// Cancel a subscription.
    fn remove_watch(&mut self, handle: Self::Handle) -> Result<(), Errno>;

    /// Drain one batch of pending records.
    fn read_events(&mut self) -> Result<Vec<RawEvent<Self::Handle>>, Errno>;

    /// Descriptor that becomes readable when records are pending.
    fn raw_fd(&self) -> RawFd;

    /// Release the descriptor.
    fn close(self) -> Result<(), Errno>
    where
        Self: Sized;
}

/// Linux inotify instance
pub struct Inotify {
    inner: inotify::Inotify,
}

impl Inotify {
    /// Allocate a blocking inotify instance.
    pub fn open() -> AutorunResult<Self> {
        let inner =
            inotify::Inotify::init(InitFlags::IN_CLOEXEC).map_err(AutorunError::NotifyInit)?;
        Ok(Self { inner })
    }

    fn watch_mask() -> AddWatchFlags {
        AddWatchFlags::IN_MOVE
            | AddWatchFlags::IN_MODIFY
            | AddWatchFlags::IN_CREATE
            | AddWatchFlags::IN_DELETE
    }
}

impl NotifySource for Inotify {
    type Handle = WatchDescriptor;

    fn add_watch(&mut self, path: &Path) -> Result<WatchDescriptor, Errno> {
        self.inner.add_watch(path, Self::watch_mask())
    }

    fn remove_watch(&mut self, handle: WatchDescriptor) -> Result<(), Errno> {
        self.inner.rm_watch(handle)
    }

    fn read_events(&mut self) -> Result<Vec<RawEvent<WatchDescriptor>>, Errno> {
        let events = self.inner.read_events()?;
        Ok(events
            .into_iter()
            .map(|event| RawEvent {
                handle: event.wd,
                mask: EventMask::from_bits_retain(event.mask.bits()),
                name: event.name,
            })
            .collect())
    }

    fn raw_fd(&self) -> RawFd {
        self.inner.as_fd().as_raw_fd()
    }

    fn close(self) -> Result<(), Errno> {
        // Closed here rather than on drop.
        let inner = ManuallyDrop::new(self.inner);
        nix::unistd::close(inner.as_fd().as_raw_fd())
    }
}

impl AsFd for Inotify {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.inner.as_fd()
    }
}
