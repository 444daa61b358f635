//! mage.exe adapter
//!
//! Implements `DescriptorTool` by running the SDK's Manifest Generation and
//! Editing tool once per operation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::domain::entities::DeploymentParameters;
use crate::domain::ports::DescriptorTool;
use crate::domain::value_objects::CertHash;
use crate::error::{PackageError, PackageResult};

/// Runs a located `mage.exe`
#[derive(Debug, Clone)]
pub struct MageTool {
    program: PathBuf,
}

impl MageTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn manifest_args(params: &DeploymentParameters) -> Vec<OsString> {
        let paths = params.paths();
        let mut args = Args::default();
        args.push("-New").push("Application");
        args.push("-ToFile").push(&paths.manifest_path);
        args.push("-Name").push(params.application_name());
        args.push("-Processor")
            .push(params.processor_architecture().as_str());
        args.push("-Version").push(params.version());
        args.push("-FromDirectory").push(params.from_directory());
        args.push("-TrustLevel").push("FullTrust");
        args.0
    }

    pub fn deployment_args(params: &DeploymentParameters) -> Vec<OsString> {
        let paths = params.paths();
        let mut args = Args::default();
        args.push("-New").push("Deployment");
        args.push("-Install")
            .push(if params.install() { "true" } else { "false" });
        args.push("-ToFile").push(&paths.deployment_path);
        args.push("-Name").push(params.application_name());
        args.push("-Version").push(params.version());
        args.push("-AppManifest").push(&paths.manifest_path);
        args.push("-Processor")
            .push(params.processor_architecture().as_str());
        if let Some(publisher) = params.publisher() {
            args.push("-Publisher").push(publisher);
        }
        args.0
    }

    pub fn sign_args(file: &Path, hash: &CertHash, timestamp_url: &str) -> Vec<OsString> {
        let mut args = Args::default();
        args.push("-Sign").push(file);
        args.push("-CertHash").push(hash.as_str());
        args.push("-TimeStampUri").push(timestamp_url);
        args.0
    }

    fn run(&self, args: Vec<OsString>) -> PackageResult<()> {
        let program = self.program.display().to_string();
        debug!(
            program = %program,
            args = ?args,
            "starting program"
        );

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| PackageError::ToolNotFound {
                program: program.clone(),
                message: e.to_string(),
            })?;

        debug!(program = %program, code = ?status.code(), "program finished");
        if status.success() {
            Ok(())
        } else {
            Err(PackageError::ToolFailed {
                program,
                code: status.code(),
            })
        }
    }
}

impl DescriptorTool for MageTool {
    fn create_manifest(&self, params: &DeploymentParameters) -> PackageResult<()> {
        self.run(Self::manifest_args(params))
    }

    fn create_deployment(&self, params: &DeploymentParameters) -> PackageResult<()> {
        self.run(Self::deployment_args(params))
    }

    fn sign(&self, file: &Path, hash: &CertHash, timestamp_url: &str) -> PackageResult<()> {
        self.run(Self::sign_args(file, hash, timestamp_url))
    }
}

#[derive(Default)]
struct Args(Vec<OsString>);

impl Args {
    fn push(&mut self, arg: impl AsRef<std::ffi::OsStr>) -> &mut Self {
        self.0.push(arg.as_ref().to_os_string());
        self
    }
}
