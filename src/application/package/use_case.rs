//! Package Use Case
//!
//! Orchestrates the packaging flow:
//! 1. Create `<to>/<version>/`
//! 2. Generate the application manifest, rewrite it, sign it
//! 3. Generate the deployment descriptor, rewrite it, sign it
//! 4. Stage the payload next to the manifest
//!
//! Any failure aborts the remaining steps. Files already written are left
//! in place.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::entities::{DeploymentParameters, SigningIdentity};
use crate::domain::ports::{CertificateStore, DescriptorTool, FileSystem};
use crate::domain::services::{apply_deployment, apply_manifest, resolve_certificate};
use crate::domain::value_objects::CertHash;
use crate::error::{PackageError, PackageResult};
use crate::xml::Document;

use super::result::PackageReport;

/// Suffix added to staged files when file-extension mapping is on
pub const DEPLOY_SUFFIX: &str = ".deploy";

/// Package use case - parameterized by its ports
pub struct PackageUseCase<T, C, F>
where
    T: DescriptorTool,
    C: CertificateStore,
    F: FileSystem,
{
    tool: T,
    certificates: C,
    file_system: F,
    now: Option<DateTime<Utc>>,
}

impl<T, C, F> PackageUseCase<T, C, F>
where
    T: DescriptorTool,
    C: CertificateStore,
    F: FileSystem,
{
    pub fn new(tool: T, certificates: C, file_system: F) -> Self {
        Self {
            tool,
            certificates,
            file_system,
            now: None,
        }
    }

    /// Judge certificate validity at `now` instead of the current time
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn execute(&self, params: &DeploymentParameters) -> PackageResult<PackageReport> {
        let paths = params.paths();

        if !self.file_system.is_dir(&paths.manifest_dir) {
            info!(dir = %paths.manifest_dir.display(), "creating directory");
            self.file_system.create_dir_all(&paths.manifest_dir)?;
        }

        info!(file = %paths.manifest_path.display(), "creating manifest");
        self.tool.create_manifest(params)?;
        self.edit_document(&paths.manifest_path, |doc| apply_manifest(doc, params))?;

        let hash = self.signing_hash(params.signing())?;
        self.sign(&paths.manifest_path, &hash, params)?;

        info!(file = %paths.deployment_path.display(), "creating deployment descriptor");
        self.tool.create_deployment(params)?;
        self.edit_document(&paths.deployment_path, |doc| apply_deployment(doc, params))?;
        self.sign(&paths.deployment_path, &hash, params)?;

        let staged = self.stage_files(params)?;

        Ok(PackageReport {
            manifest_path: paths.manifest_path.clone(),
            deployment_path: paths.deployment_path.clone(),
            certificate_hash: hash,
            staged,
        })
    }

    fn edit_document<E>(&self, path: &Path, edit: E) -> PackageResult<()>
    where
        E: FnOnce(&mut Document) -> PackageResult<()>,
    {
        let text = self.file_system.read(path)?;
        let mut doc = Document::parse(&text).map_err(|e| PackageError::Xml {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        edit(&mut doc)?;
        self.file_system.write(path, &doc.to_xml_string())?;
        debug!(file = %path.display(), "rewrote document");
        Ok(())
    }

    fn signing_hash(&self, identity: &SigningIdentity) -> PackageResult<CertHash> {
        let candidates = match identity {
            SigningIdentity::Hash(_) => Vec::new(),
            SigningIdentity::CommonName(_) => self.certificates.candidates()?,
        };
        resolve_certificate(identity, &candidates, self.now.unwrap_or_else(Utc::now))
    }

    fn sign(&self, file: &Path, hash: &CertHash, params: &DeploymentParameters) -> PackageResult<()> {
        info!(file = %file.display(), "signing");
        self.tool.sign(file, hash, params.timestamp_url())
    }

    fn stage_files(&self, params: &DeploymentParameters) -> PackageResult<Vec<PathBuf>> {
        let manifest_dir = &params.paths().manifest_dir;
        let mut staged = Vec::new();

        for source in self.file_system.list_files(params.from_directory())? {
            let Some(file_name) = source.file_name() else {
                continue;
            };
            let mut destination_name = file_name.to_os_string();
            if params.map_file_extensions() {
                destination_name.push(DEPLOY_SUFFIX);
            }
            let destination = manifest_dir.join(destination_name);

            self.file_system.copy(&source, &destination)?;
            debug!(file = %destination.display(), "copied file");
            staged.push(destination);
        }

        info!(count = staged.len(), "staged files");
        Ok(staged)
    }
}
