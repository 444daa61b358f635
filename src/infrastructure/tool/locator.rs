//! Finding mage.exe
//!
//! Looked up once, before anything runs: an explicitly configured path,
//! else the newest Windows SDK under Program Files that ships the tool,
//! else the bare program name for the OS to resolve through `PATH`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::ports::FileSystem;

pub const MAGE_PROGRAM: &str = "mage.exe";

/// SDK directories that ship mage.exe, oldest first
const SDK_DIRECTORIES: &[&str] = &[
    r"Microsoft SDKs\Windows\V7.0A\Bin",
    r"Microsoft SDKs\Windows\v6.0A\Bin",
    r"Microsoft SDKs\Windows\v7.0A\Bin\NETFX 4.0 Tools",
    r"Microsoft SDKs\Windows\v8.1A\Bin\NETFX 4.5.1 Tools",
    r"Microsoft SDKs\Windows\v10.0A\Bin\NETFX 4.6 Tools",
    r"Microsoft SDKs\Windows\v10.0A\Bin\NETFX 4.6.1 Tools",
    r"Microsoft SDKs\Windows\v10.0A\Bin\NETFX 4.7.1 Tools",
    r"Microsoft SDKs\Windows\v10.0A\Bin\NETFX 4.7.2 Tools",
];

const PROGRAM_FILES_VARS: &[&str] = &["ProgramFiles(x86)", "ProgramFiles"];

#[derive(Debug, Clone, Default)]
pub struct MageLocator {
    configured: Option<PathBuf>,
    program_files: Vec<PathBuf>,
}

impl MageLocator {
    /// Locator using the Program Files directories of this machine
    pub fn from_env(configured: Option<PathBuf>) -> Self {
        let mut program_files: Vec<PathBuf> = Vec::new();
        for var in PROGRAM_FILES_VARS {
            if let Some(dir) = std::env::var_os(var).map(PathBuf::from) {
                if !program_files.contains(&dir) {
                    program_files.push(dir);
                }
            }
        }
        Self {
            configured,
            program_files,
        }
    }

    pub fn with_program_files(mut self, roots: Vec<PathBuf>) -> Self {
        self.program_files = roots;
        self
    }

    /// Every SDK location checked, in preference order
    pub fn candidates(&self) -> Vec<PathBuf> {
        self.program_files
            .iter()
            .flat_map(|root| {
                SDK_DIRECTORIES
                    .iter()
                    .rev()
                    .map(move |dir| windows_join(root, dir).join(MAGE_PROGRAM))
            })
            .collect()
    }

    pub fn locate<F: FileSystem + ?Sized>(&self, fs: &F) -> PathBuf {
        if let Some(path) = self.configured.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            debug!(path = %path.display(), "using configured mage.exe");
            return path.clone();
        }

        match self.candidates().into_iter().find(|c| fs.is_file(c)) {
            Some(found) => {
                debug!(path = %found.display(), "found mage.exe in Windows SDK");
                found
            }
            None => {
                debug!("mage.exe not found in any Windows SDK, relying on PATH");
                PathBuf::from(MAGE_PROGRAM)
            }
        }
    }
}

fn windows_join(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('\\')
        .fold(root.to_path_buf(), |path, part| path.join(part))
}
