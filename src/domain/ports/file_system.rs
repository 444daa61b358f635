//! FileSystem port - abstraction over file I/O operations
//!
//! Lets the domain and application layers check, read, write and stage
//! files without depending on a concrete implementation (local, in-memory).

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classify an I/O error against the path it concerns
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

impl From<FsError> for crate::error::PackageError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::Io { source, .. } => crate::error::PackageError::Io(source),
            other => crate::error::PackageError::Io(std::io::Error::other(other.to_string())),
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic writes
/// - `MemoryFs` - in-memory, for tests
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Write content to file atomically
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Check if a regular file exists
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a directory exists
    fn is_dir(&self, path: &Path) -> bool;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Regular files directly inside `dir`, sorted by path
    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>>;

    /// Copy a file, replacing the destination
    fn copy(&self, from: &Path, to: &Path) -> FsResult<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read(&self, path: &Path) -> FsResult<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        (**self).write(path, content)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        (**self).create_dir_all(path)
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        (**self).list_files(dir)
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        (**self).copy(from, to)
    }
}
