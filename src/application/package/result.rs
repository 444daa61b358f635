//! Package Result

use std::path::PathBuf;

use crate::domain::value_objects::CertHash;

/// Files produced by a packaging run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    /// Signed application manifest
    pub manifest_path: PathBuf,
    /// Signed deployment descriptor
    pub deployment_path: PathBuf,
    /// Certificate both descriptors were signed with
    pub certificate_hash: CertHash,
    /// Payload files copied next to the manifest, by destination path
    pub staged: Vec<PathBuf>,
}
