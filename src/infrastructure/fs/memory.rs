//! In-memory File System
//!
//! A `FileSystem` that never touches disk. Used by unit and integration
//! tests that exercise validation and the packaging pipeline.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// In-memory file system; directories are implied by the files in them
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RefCell<BTreeMap<PathBuf, String>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to seed a file
    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.files.borrow_mut().insert(path, content.to_string());
        self
    }

    /// Builder-style helper to seed an empty directory
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.dirs.borrow_mut().insert(path);
        self
    }

    /// Paths of every file currently stored
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }

    fn add_parents(&self, path: &Path) {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.add_parents(path);
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.add_parents(path);
        self.dirs.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        if !self.is_dir(dir) {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        let content = self.read(from)?;
        self.write(to, &content)
    }
}
