//! Raw notification records and their diagnostic classification

use std::ffi::OsString;
use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// inotify event bits as delivered in `inotify_event.mask`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventMask: u32 {
        const ACCESS = libc::IN_ACCESS;
        const MODIFY = libc::IN_MODIFY;
        const ATTRIB = libc::IN_ATTRIB;
        const CLOSE_WRITE = libc::IN_CLOSE_WRITE;
        const CLOSE_NOWRITE = libc::IN_CLOSE_NOWRITE;
        const OPEN = libc::IN_OPEN;
        const MOVED_FROM = libc::IN_MOVED_FROM;
        const MOVED_TO = libc::IN_MOVED_TO;
        const CREATE = libc::IN_CREATE;
        const DELETE = libc::IN_DELETE;
        const DELETE_SELF = libc::IN_DELETE_SELF;
        const MOVE_SELF = libc::IN_MOVE_SELF;
        const UNMOUNT = libc::IN_UNMOUNT;
        const Q_OVERFLOW = libc::IN_Q_OVERFLOW;
        const IGNORED = libc::IN_IGNORED;
        const ONLYDIR = libc::IN_ONLYDIR;
        const DONT_FOLLOW = libc::IN_DONT_FOLLOW;
        const EXCL_UNLINK = libc::IN_EXCL_UNLINK;
        const MASK_ADD = libc::IN_MASK_ADD;
        const ISDIR = libc::IN_ISDIR;
        const ONESHOT = libc::IN_ONESHOT;
    }
}

impl EventMask {
    /// The kernel dropped the watch on its own (target gone, unmount, `rm_watch`).
    pub fn is_forced_removal(self) -> bool {
        self.contains(EventMask::IGNORED)
    }

    /// The kernel queue overflowed; the record carries no watch handle.
    pub fn is_overflow(self) -> bool {
        self.contains(EventMask::Q_OVERFLOW)
    }

    /// A directory appeared inside a watched directory.
    pub fn is_new_directory(self) -> bool {
        self.contains(EventMask::ISDIR)
            && self.intersects(EventMask::CREATE | EventMask::MOVED_TO)
    }
}

/// Human-readable label for a record, used only in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Access,
    MetadataChange,
    CloseAfterWrite,
    CloseWithoutWrite,
    Create,
    Delete,
    SelfDelete,
    Modify,
    SelfMove,
    MovedFrom,
    MovedTo,
    Open,
    ForcedRemoval,
    WatchIsDirectoryOnly,
    SymlinkNotFollowed,
    ExcludeUnlinked,
    MaskAdd,
    OneShot,
    QueueOverflow,
    Unmount,
    Unknown,
}

/// Classification priority: the first entry whose bit is set wins.
const CLASSIFICATION: &[(EventMask, EventKind)] = &[
    (EventMask::ACCESS, EventKind::Access),
    (EventMask::ATTRIB, EventKind::MetadataChange),
    (EventMask::CLOSE_WRITE, EventKind::CloseAfterWrite),
    (EventMask::CLOSE_NOWRITE, EventKind::CloseWithoutWrite),
    (EventMask::CREATE, EventKind::Create),
    (EventMask::DELETE, EventKind::Delete),
    (EventMask::DELETE_SELF, EventKind::SelfDelete),
    (EventMask::MODIFY, EventKind::Modify),
    (EventMask::MOVE_SELF, EventKind::SelfMove),
    (EventMask::MOVED_FROM, EventKind::MovedFrom),
    (EventMask::MOVED_TO, EventKind::MovedTo),
    (EventMask::OPEN, EventKind::Open),
    (EventMask::IGNORED, EventKind::ForcedRemoval),
    (EventMask::ONLYDIR, EventKind::WatchIsDirectoryOnly),
    (EventMask::DONT_FOLLOW, EventKind::SymlinkNotFollowed),
    (EventMask::EXCL_UNLINK, EventKind::ExcludeUnlinked),
    (EventMask::MASK_ADD, EventKind::MaskAdd),
    (EventMask::ONESHOT, EventKind::OneShot),
    (EventMask::Q_OVERFLOW, EventKind::QueueOverflow),
    (EventMask::UNMOUNT, EventKind::Unmount),
];

impl EventKind {
    pub fn classify(mask: EventMask) -> Self {
        CLASSIFICATION
            .iter()
            .find(|(bit, _)| mask.contains(*bit))
            .map(|(_, kind)| *kind)
            .unwrap_or(EventKind::Unknown)
    }

    /// The ordered classification table.
    pub fn priority() -> impl Iterator<Item = (EventMask, EventKind)> {
        CLASSIFICATION.iter().copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            EventKind::Access => "access",
            EventKind::MetadataChange => "metadata-change",
            EventKind::CloseAfterWrite => "close-after-write",
            EventKind::CloseWithoutWrite => "close-without-write",
            EventKind::Create => "create",
            EventKind::Delete => "delete",
            EventKind::SelfDelete => "self-delete",
            EventKind::Modify => "modify",
            EventKind::SelfMove => "self-move",
            EventKind::MovedFrom => "moved-from",
            EventKind::MovedTo => "moved-to",
            EventKind::Open => "open",
            EventKind::ForcedRemoval => "forced-removal",
            EventKind::WatchIsDirectoryOnly => "watch-is-directory-only",
            EventKind::SymlinkNotFollowed => "symlink-not-followed",
            EventKind::ExcludeUnlinked => "exclude-unlinked",
            EventKind::MaskAdd => "mask-add",
            EventKind::OneShot => "one-shot",
            EventKind::QueueOverflow => "queue-overflow",
            EventKind::Unmount => "unmount",
            EventKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One decoded notification record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent<H> {
    /// Watch the record was delivered on
    pub handle: H,
    pub mask: EventMask,
    /// Entry name relative to the watched directory, if any
    pub name: Option<OsString>,
}

impl<H> RawEvent<H> {
    pub fn new(handle: H, mask: EventMask) -> Self {
        Self {
            handle,
            mask,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<OsString>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(&self) -> EventKind {
        EventKind::classify(self.mask)
    }
}
