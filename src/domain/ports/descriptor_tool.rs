//! DescriptorTool port - the external program that writes and signs descriptors

use std::path::Path;

use crate::domain::entities::DeploymentParameters;
use crate::domain::value_objects::CertHash;
use crate::error::PackageResult;

/// Generates and signs ClickOnce descriptors
///
/// Each operation either succeeds or reports why the program could not be
/// run or exited unsuccessfully.
pub trait DescriptorTool {
    /// Write a fresh application manifest at `params.paths().manifest_path`
    fn create_manifest(&self, params: &DeploymentParameters) -> PackageResult<()>;

    /// Write a fresh deployment manifest at `params.paths().deployment_path`
    fn create_deployment(&self, params: &DeploymentParameters) -> PackageResult<()>;

    /// Sign `file` in place with the certificate identified by `hash`
    fn sign(&self, file: &Path, hash: &CertHash, timestamp_url: &str) -> PackageResult<()>;
}

impl<T: DescriptorTool + ?Sized> DescriptorTool for &T {
    fn create_manifest(&self, params: &DeploymentParameters) -> PackageResult<()> {
        (**self).create_manifest(params)
    }

    fn create_deployment(&self, params: &DeploymentParameters) -> PackageResult<()> {
        (**self).create_deployment(params)
    }

    fn sign(&self, file: &Path, hash: &CertHash, timestamp_url: &str) -> PackageResult<()> {
        (**self).sign(file, hash, timestamp_url)
    }
}
