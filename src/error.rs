// src/error.rs
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Coarse classification of a listing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotADirectory,
    PermissionDenied,
    Unknown,
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error("no such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("failed to list {}: {source}", path.display())]
    Unknown {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListError {
    /// Maps an I/O failure on `path` to the most specific kind available.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ListError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => ListError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotADirectory => ListError::NotADirectory(path.to_path_buf()),
            _ => ListError::Unknown { path: path.to_path_buf(), source: err },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ListError::NotFound(_) => ErrorKind::NotFound,
            ListError::NotADirectory(_) => ErrorKind::NotADirectory,
            ListError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            ListError::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ListError::NotFound(p) | ListError::NotADirectory(p) | ListError::PermissionDenied(p) => p,
            ListError::Unknown { path, .. } => path,
        }
    }
}
