//! Error types for clickonce
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::ValidationErrors;

/// Result type alias for clickonce operations
pub type PackageResult<T> = Result<T, PackageError>;

/// Main error type for clickonce operations
#[derive(Error, Debug)]
pub enum PackageError {
    /// One or more parameter problems, collected during validation
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Derived values requested from parameters that still carry errors
    #[error("cannot derive package paths while the parameters have errors")]
    InvalidState,

    /// No candidate certificate carries the requested common name
    #[error("certificate not found: {identity}")]
    CertificateNotFound { identity: String },

    /// The best matching certificate is outside its validity window
    #[error("certificate not valid: {identity}")]
    CertificateExpired { identity: String },

    /// Application manifest lacks an element the transformer relies on
    #[error("malformed manifest: {reason}")]
    MalformedManifest { reason: String },

    /// Deployment descriptor lacks an element the transformer relies on
    #[error("malformed deployment descriptor: {reason}")]
    MalformedDeployment { reason: String },

    /// Files assigned to a group that the manifest does not list
    #[error("{}", describe_unassigned(.files))]
    UnassignedGroupFile { files: Vec<String> },

    /// XML could not be parsed
    #[error("invalid XML in {}: {message}", .file.display())]
    Xml { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// External program could not be started
    #[error("cannot run {program}: {message}")]
    ToolNotFound { program: String, message: String },

    /// External program ran and reported failure
    #[error("program {program} exited with code {}", describe_code(.code))]
    ToolFailed { program: String, code: Option<i32> },

    /// Certificate candidates could not be listed
    #[error("cannot read certificate store: {message}")]
    CertificateStore { message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {}: {message}", .file.display())]
    Config { file: PathBuf, message: String },
}

fn describe_unassigned(files: &[String]) -> String {
    match files {
        [single] => format!("non-existent file is assigned to group: {}", single),
        many => {
            let mut message = String::from("non-existent files are assigned to groups:");
            for file in many {
                message.push_str("\n   ");
                message.push_str(file);
            }
            message
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "unknown".to_string(),
    }
}

impl From<ValidationErrors> for PackageError {
    fn from(errors: ValidationErrors) -> Self {
        PackageError::Validation(errors)
    }
}
