//! Certificate inventory file
//!
//! A TOML list of certificates for hosts without a Windows certificate
//! store, for example a build agent that signs by thumbprint through a
//! hardware token:
//!
//! ```toml
//! [[certificate]]
//! subject = "CN=Example Pty Ltd, O=Example"
//! not_before = "2024-01-01T00:00:00Z"
//! not_after = "2026-01-01T00:00:00Z"
//! hash = "AB12..."
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::CertificateCandidate;
use crate::domain::ports::{CertificateStore, FileSystem};
use crate::domain::value_objects::CertHash;
use crate::error::{PackageError, PackageResult};
use crate::infrastructure::fs::LocalFs;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Inventory {
    #[serde(default)]
    certificate: Vec<InventoryEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InventoryEntry {
    subject: String,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    hash: CertHash,
}

/// Reads candidates from an inventory file on every call
#[derive(Debug, Clone)]
pub struct InventoryCertificateStore<F: FileSystem = LocalFs> {
    path: PathBuf,
    fs: F,
}

impl InventoryCertificateStore<LocalFs> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, LocalFs::new())
    }
}

impl<F: FileSystem> InventoryCertificateStore<F> {
    pub fn with_fs(path: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<F: FileSystem> CertificateStore for InventoryCertificateStore<F> {
    fn candidates(&self) -> PackageResult<Vec<CertificateCandidate>> {
        let text = self.fs.read(&self.path)?;
        parse_inventory(&text).map_err(|message| PackageError::CertificateStore {
            message: format!("{}: {}", self.path.display(), message),
        })
    }
}

fn parse_inventory(text: &str) -> Result<Vec<CertificateCandidate>, String> {
    let inventory: Inventory = toml::from_str(text).map_err(|e| e.message().to_string())?;
    Ok(inventory
        .certificate
        .into_iter()
        .map(|entry| {
            CertificateCandidate::from_subject(
                &entry.subject,
                entry.not_before,
                entry.not_after,
                entry.hash,
            )
        })
        .collect())
}
