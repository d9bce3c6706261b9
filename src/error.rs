//! Error types for autorun
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;

use nix::errno::Errno;
use thiserror::Error;

/// Result type alias for autorun operations
pub type AutorunResult<T> = Result<T, AutorunError>;

/// Main error type for autorun operations
#[derive(Error, Debug)]
pub enum AutorunError {
    /// The inotify instance could not be allocated
    #[error("inotify_init: {0}")]
    NotifyInit(#[source] Errno),

    /// The epoll instance could not be allocated
    #[error("epoll_create: {0}")]
    MultiplexerInit(#[source] Errno),

    /// The notification descriptor could not be added to epoll
    #[error("epoll_ctl: {0}")]
    Register(#[source] Errno),

    /// A watch could not be placed on a path
    #[error("add_watch {}: {source}", path.display())]
    AddWatch {
        path: PathBuf,
        #[source]
        source: Errno,
    },

    /// The blocking wait failed with something other than EINTR
    #[error("epoll_wait: {0}")]
    Wait(#[source] Errno),

    /// Reading the notification descriptor failed
    #[error("read: {0}")]
    Read(#[source] Errno),

    /// Closing the notification descriptor failed
    #[error("close: {0}")]
    Close(#[source] Errno),

    /// A `--file` target is not a regular file
    #[error("{} is not a file", path.display())]
    NotAFile { path: PathBuf },

    /// A `--dir` target is not a directory
    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// A target could not be inspected
    #[error("{}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid settings file
    #[error("invalid config in {}: {message}", file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// Settings file named on the command line does not exist
    #[error("config file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AutorunError {
    /// The OS error number carried by this error, if any.
    pub fn errno(&self) -> Option<Errno> {
        match self {
            AutorunError::NotifyInit(errno)
            | AutorunError::MultiplexerInit(errno)
            | AutorunError::Register(errno)
            | AutorunError::Wait(errno)
            | AutorunError::Read(errno)
            | AutorunError::Close(errno) => Some(*errno),
            AutorunError::AddWatch { source, .. } => Some(*source),
            AutorunError::Stat { source, .. } | AutorunError::Io(source) => {
                source.raw_os_error().map(Errno::from_raw)
            }
            _ => None,
        }
    }

    /// Process exit code: the numeric OS error when present, else 1.
    pub fn exit_code(&self) -> i32 {
        match self.errno() {
            Some(errno) if errno as i32 > 0 => errno as i32,
            _ => 1,
        }
    }
}
