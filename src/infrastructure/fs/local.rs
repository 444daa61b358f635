//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go through a temporary file in the target directory and are
/// renamed into place, so a failed run never leaves half a descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| FsError::from_io(parent, e))?;

        let mut temp =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(parent, e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| FsError::from_io(path, e))?;
        temp.persist(path)
            .map_err(|e| FsError::from_io(path, e.error))?;
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| FsError::from_io(dir, e))? {
            let entry = entry.map_err(|e| FsError::from_io(dir, e))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| FsError::from_io(from, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn local_fs_write_and_read() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.txt");
        let fs = LocalFs::new();

        fs.write(&file, "hello world").unwrap();
        let content = fs.read(&file).unwrap();

        assert_eq!(content, "hello world");
    }

    #[test]
    fn local_fs_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("dir").join("test.txt");
        let fs = LocalFs::new();

        fs.write(&file, "content").unwrap();

        assert!(file.exists());
    }

    #[test]
    fn local_fs_write_replaces_existing() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("app.manifest");
        let fs = LocalFs::new();

        fs.write(&file, "first").unwrap();
        fs.write(&file, "second").unwrap();

        assert_eq!(fs.read(&file).unwrap(), "second");
    }

    #[test]
    fn local_fs_read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();

        let err = fs.read(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }

    #[test]
    fn local_fs_is_file_and_is_dir() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        let fs = LocalFs::new();

        assert!(fs.is_dir(dir.path()));
        assert!(!fs.is_file(&file));

        fs.write(&file, "content").unwrap();

        assert!(fs.is_file(&file));
        assert!(!fs.is_dir(&file));
    }

    #[test]
    fn local_fs_list_files_skips_directories() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        fs.write(&dir.path().join("b.dll"), "b").unwrap();
        fs.write(&dir.path().join("a.exe"), "a").unwrap();
        fs.create_dir_all(&dir.path().join("sub")).unwrap();
        fs.write(&dir.path().join("sub").join("c.txt"), "c").unwrap();

        let files = fs.list_files(dir.path()).unwrap();

        assert_eq!(
            files,
            vec![dir.path().join("a.exe"), dir.path().join("b.dll")]
        );
    }

    #[test]
    fn local_fs_copy_overwrites() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        let from = dir.path().join("from.txt");
        let to = dir.path().join("to.txt");
        fs.write(&from, "new").unwrap();
        fs.write(&to, "old").unwrap();

        fs.copy(&from, &to).unwrap();

        assert_eq!(fs.read(&to).unwrap(), "new");
    }
}
