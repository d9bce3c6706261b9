//! Path classification for command-line targets

use std::io;
use std::path::Path;

use crate::error::{AutorunError, AutorunResult};

/// What a target path resolves to on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
    Other,
}

/// Classify `path`, following symlinks the way `stat(2)` does.
pub fn classify(path: &Path) -> io::Result<PathKind> {
    let metadata = std::fs::metadata(path)?;
    let file_type = metadata.file_type();
    Ok(if file_type.is_file() {
        PathKind::File
    } else if file_type.is_dir() {
        PathKind::Directory
    } else {
        PathKind::Other
    })
}

/// Ensure `path` is a regular file.
pub fn require_file(path: &Path) -> AutorunResult<()> {
    match classify(path) {
        Ok(PathKind::File) => Ok(()),
        Ok(_) => Err(AutorunError::NotAFile {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(AutorunError::Stat {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Ensure `path` is a directory.
pub fn require_dir(path: &Path) -> AutorunResult<()> {
    match classify(path) {
        Ok(PathKind::Directory) => Ok(()),
        Ok(_) => Err(AutorunError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(AutorunError::Stat {
            path: path.to_path_buf(),
            source,
        }),
    }
}
