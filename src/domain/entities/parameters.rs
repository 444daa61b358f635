//! Deployment parameters
//!
//! `RawParameters` is what the user typed (merged with configuration).
//! Validation collects every problem at once and, when there are none,
//! yields an immutable `DeploymentParameters` whose derived paths are
//! computed exactly once.

use std::path::{Path, PathBuf};

use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{
    resolve_compatible, CertHash, ProcessorArchitecture, TargetFramework,
};
use crate::error::{PackageError, PackageResult};

use super::certificate::SigningIdentity;
use super::groups::GroupAssignments;
use super::validation::{RequiredField, ValidationError, ValidationErrors};

/// Timestamp service used when none is configured
pub const DEFAULT_TIMESTAMP_URL: &str = "http://timestamp.verisign.com/scripts/timstamp.dll";

/// Unvalidated parameters
#[derive(Debug, Clone, Default)]
pub struct RawParameters {
    pub application_name: Option<String>,
    pub exe_name: Option<String>,
    pub version: Option<String>,
    pub publisher: Option<String>,
    pub product: Option<String>,
    pub processor_architecture: Option<String>,
    pub from_directory: Option<PathBuf>,
    pub to_directory: Option<PathBuf>,
    pub certificate_hash: Option<String>,
    pub certificate_name: Option<String>,
    pub timestamp_url: Option<String>,
    pub install: bool,
    pub create_desktop_shortcut: bool,
    pub map_file_extensions: bool,
    pub trust_url_parameters: bool,
    pub disable_auto_update: bool,
    pub desktop_icon_file: Option<String>,
    /// Framework identifiers in the order given
    pub frameworks: Vec<String>,
    /// `Group:File` arguments
    pub groups: Vec<String>,
    /// Positional arguments nobody asked for
    pub extra_arguments: Vec<String>,
}

impl RawParameters {
    /// Run every check and collect the outcome
    pub fn check<F: FileSystem + ?Sized>(&self, fs: &F) -> ValidationReport {
        Checker::new(self, fs).run()
    }

    /// Validate into usable parameters or the full list of problems
    pub fn validate<F: FileSystem + ?Sized>(
        &self,
        fs: &F,
    ) -> Result<DeploymentParameters, ValidationErrors> {
        self.check(fs).into_result()
    }
}

/// Validate `raw` against `fs`
pub fn validate<F: FileSystem + ?Sized>(
    raw: &RawParameters,
    fs: &F,
) -> Result<DeploymentParameters, ValidationErrors> {
    raw.validate(fs)
}

/// Paths that follow from (to-directory, version, executable name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedPaths {
    pub manifest_dir: PathBuf,
    pub manifest_file_name: String,
    pub manifest_path: PathBuf,
    pub deployment_file_name: String,
    pub deployment_path: PathBuf,
}

impl DerivedPaths {
    pub fn derive(to_directory: &Path, version: &str, exe_name: &str) -> Self {
        let manifest_dir = to_directory.join(version);
        let manifest_file_name = format!("{}.manifest", exe_name);
        let manifest_path = manifest_dir.join(&manifest_file_name);

        let stem = Path::new(exe_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| exe_name.to_string());
        let deployment_file_name = format!("{}.application", stem);
        let deployment_path = to_directory.join(&deployment_file_name);

        Self {
            manifest_dir,
            manifest_file_name,
            manifest_path,
            deployment_file_name,
            deployment_path,
        }
    }
}

/// Outcome of checking `RawParameters`: normalised values plus errors
#[derive(Debug, Clone)]
pub struct ValidationReport {
    raw: RawParameters,
    processor_architecture: ProcessorArchitecture,
    signing: Option<SigningIdentity>,
    frameworks: Vec<TargetFramework>,
    groups: GroupAssignments,
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Derived paths; refused while errors are pending
    pub fn derive_paths(&self) -> PackageResult<DerivedPaths> {
        if self.has_errors() {
            return Err(PackageError::InvalidState);
        }
        Ok(self.paths_unchecked())
    }

    // Without errors every required field is present.
    fn paths_unchecked(&self) -> DerivedPaths {
        DerivedPaths::derive(
            self.raw.to_directory.as_deref().unwrap_or(Path::new("")),
            self.raw.version.as_deref().unwrap_or_default().trim(),
            self.raw.exe_name.as_deref().unwrap_or_default().trim(),
        )
    }

    pub fn into_result(self) -> Result<DeploymentParameters, ValidationErrors> {
        if let Some(errors) = ValidationErrors::new(self.errors.clone()) {
            return Err(errors);
        }
        let paths = self.paths_unchecked();

        let raw = self.raw;
        Ok(DeploymentParameters {
            application_name: trimmed(raw.application_name),
            exe_name: trimmed(raw.exe_name),
            version: trimmed(raw.version),
            publisher: non_empty(raw.publisher),
            product: non_empty(raw.product),
            processor_architecture: self.processor_architecture,
            from_directory: raw.from_directory.unwrap_or_default(),
            to_directory: raw.to_directory.unwrap_or_default(),
            signing: self
                .signing
                .unwrap_or_else(|| SigningIdentity::CommonName(String::new())),
            timestamp_url: non_empty(raw.timestamp_url)
                .unwrap_or_else(|| DEFAULT_TIMESTAMP_URL.to_string()),
            install: raw.install,
            create_desktop_shortcut: raw.create_desktop_shortcut,
            map_file_extensions: raw.map_file_extensions,
            trust_url_parameters: raw.trust_url_parameters,
            disable_auto_update: raw.disable_auto_update,
            desktop_icon_file: non_empty(raw.desktop_icon_file),
            frameworks: self.frameworks,
            groups: self.groups,
            paths,
        })
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn present_path(value: &Option<PathBuf>) -> Option<&Path> {
    value.as_deref().filter(|p| !p.as_os_str().is_empty())
}

struct Checker<'a, F: FileSystem + ?Sized> {
    raw: &'a RawParameters,
    fs: &'a F,
    errors: Vec<ValidationError>,
}

impl<'a, F: FileSystem + ?Sized> Checker<'a, F> {
    fn new(raw: &'a RawParameters, fs: &'a F) -> Self {
        Self {
            raw,
            fs,
            errors: Vec::new(),
        }
    }

    fn run(mut self) -> ValidationReport {
        let raw = self.raw;

        self.require(present(&raw.application_name), RequiredField::ApplicationName);
        self.require(present(&raw.exe_name), RequiredField::ExeName);
        self.require(present(&raw.version), RequiredField::Version);

        let from = present_path(&raw.from_directory);
        match from {
            None => self
                .errors
                .push(ValidationError::Missing(RequiredField::FromDirectory)),
            Some(dir) if !self.fs.is_dir(dir) => self
                .errors
                .push(ValidationError::FromDirectoryNotFound(dir.to_path_buf())),
            Some(_) => {}
        }

        if present_path(&raw.to_directory).is_none() {
            self.errors
                .push(ValidationError::Missing(RequiredField::ToDirectory));
        }

        let signing = self.check_signing();
        self.check_icon(from);
        let frameworks = self.check_frameworks();
        let groups = self.check_groups();
        let processor_architecture = self.check_processor();

        for extra in &raw.extra_arguments {
            self.errors
                .push(ValidationError::UnknownArgument(extra.clone()));
        }

        ValidationReport {
            raw: raw.clone(),
            processor_architecture,
            signing,
            frameworks,
            groups,
            errors: self.errors,
        }
    }

    fn require(&mut self, value: Option<&str>, field: RequiredField) {
        if value.is_none() {
            self.errors.push(ValidationError::Missing(field));
        }
    }

    fn check_signing(&mut self) -> Option<SigningIdentity> {
        let raw = self.raw;
        if let Some(hash) = present(&raw.certificate_hash) {
            return Some(SigningIdentity::Hash(CertHash::verbatim(hash)));
        }
        if let Some(name) = present(&raw.certificate_name) {
            return Some(SigningIdentity::CommonName(name.trim().to_string()));
        }
        self.errors.push(ValidationError::MissingSigningIdentity);
        None
    }

    fn check_icon(&mut self, from: Option<&Path>) {
        let raw = self.raw;
        let Some(icon) = present(&raw.desktop_icon_file) else {
            return;
        };

        let bare = !icon.contains(['/', '\\'])
            && Path::new(icon).file_name().is_some_and(|n| n == icon);
        if !bare {
            self.errors.push(ValidationError::IconHasDirectory);
            return;
        }

        // Existence can only be checked once the from-directory is known.
        if let Some(dir) = from {
            let full_path = dir.join(icon);
            if !self.fs.is_file(&full_path) {
                self.errors.push(ValidationError::IconNotFound(full_path));
            }
        }

        let is_ico = Path::new(icon)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ico"));
        if !is_ico {
            self.errors.push(ValidationError::IconNotIco);
        }
    }

    fn check_frameworks(&mut self) -> Vec<TargetFramework> {
        match resolve_compatible(&self.raw.frameworks) {
            Ok(frameworks) => frameworks,
            Err(unknown) => {
                for framework in unknown {
                    self.errors
                        .push(ValidationError::UnknownFramework(framework.0));
                }
                self.errors.push(ValidationError::ValidFrameworks(
                    TargetFramework::valid_identifiers(),
                ));
                Vec::new()
            }
        }
    }

    fn check_groups(&mut self) -> GroupAssignments {
        let raw = self.raw;
        let mut groups = GroupAssignments::new();
        for argument in &raw.groups {
            if let Err(err) = groups.assign_argument(argument) {
                self.errors.push(err);
            }
        }
        groups
    }

    fn check_processor(&mut self) -> ProcessorArchitecture {
        let raw = self.raw;
        let Some(value) = present(&raw.processor_architecture) else {
            return ProcessorArchitecture::default();
        };
        match value.parse() {
            Ok(arch) => arch,
            Err(unknown) => {
                self.errors.push(ValidationError::UnknownProcessor(unknown));
                ProcessorArchitecture::default()
            }
        }
    }
}

/// Validated, immutable deployment parameters
#[derive(Debug, Clone)]
pub struct DeploymentParameters {
    application_name: String,
    exe_name: String,
    version: String,
    publisher: Option<String>,
    product: Option<String>,
    processor_architecture: ProcessorArchitecture,
    from_directory: PathBuf,
    to_directory: PathBuf,
    signing: SigningIdentity,
    timestamp_url: String,
    install: bool,
    create_desktop_shortcut: bool,
    map_file_extensions: bool,
    trust_url_parameters: bool,
    disable_auto_update: bool,
    desktop_icon_file: Option<String>,
    frameworks: Vec<TargetFramework>,
    groups: GroupAssignments,
    paths: DerivedPaths,
}

impl DeploymentParameters {
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn exe_name(&self) -> &str {
        &self.exe_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    pub fn product(&self) -> Option<&str> {
        self.product.as_deref()
    }

    pub fn processor_architecture(&self) -> ProcessorArchitecture {
        self.processor_architecture
    }

    pub fn from_directory(&self) -> &Path {
        &self.from_directory
    }

    pub fn to_directory(&self) -> &Path {
        &self.to_directory
    }

    pub fn signing(&self) -> &SigningIdentity {
        &self.signing
    }

    pub fn timestamp_url(&self) -> &str {
        &self.timestamp_url
    }

    pub fn install(&self) -> bool {
        self.install
    }

    pub fn create_desktop_shortcut(&self) -> bool {
        self.create_desktop_shortcut
    }

    pub fn map_file_extensions(&self) -> bool {
        self.map_file_extensions
    }

    pub fn trust_url_parameters(&self) -> bool {
        self.trust_url_parameters
    }

    pub fn disable_auto_update(&self) -> bool {
        self.disable_auto_update
    }

    pub fn desktop_icon_file(&self) -> Option<&str> {
        self.desktop_icon_file.as_deref()
    }

    /// Resolved compatible frameworks, in advertised order
    pub fn frameworks(&self) -> &[TargetFramework] {
        &self.frameworks
    }

    pub fn groups(&self) -> &GroupAssignments {
        &self.groups
    }

    pub fn paths(&self) -> &DerivedPaths {
        &self.paths
    }
}

#[cfg(test)]
mod tests;
