//! Parameter validation errors
//!
//! Validation never stops at the first problem; every error found is kept
//! so the user can fix them all in one pass.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Mandatory parameter names, as the user spells them on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    ApplicationName,
    ExeName,
    Version,
    FromDirectory,
    ToDirectory,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RequiredField::ApplicationName => "application name (--name)",
            RequiredField::ExeName => "application executable (--exe)",
            RequiredField::Version => "application version (--version)",
            RequiredField::FromDirectory => "from directory (--from)",
            RequiredField::ToDirectory => "to directory (--to)",
        };
        f.write_str(text)
    }
}

/// A single problem with the deployment parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be specified")]
    Missing(RequiredField),

    #[error("cannot find from directory: {}", .0.display())]
    FromDirectoryNotFound(PathBuf),

    #[error("must specify --hash or --certificate")]
    MissingSigningIdentity,

    #[error("desktop icon file should not include the directory -- it must be in the 'from' directory")]
    IconHasDirectory,

    #[error("cannot find desktop icon file: {}", .0.display())]
    IconNotFound(PathBuf),

    #[error("desktop icon file must have .ico suffix")]
    IconNotIco,

    #[error("unknown framework: {0}")]
    UnknownFramework(String),

    #[error("valid frameworks: {0}")]
    ValidFrameworks(String),

    #[error("invalid group argument '{0}'. Example: --group=GroupName:FileName.dll")]
    InvalidGroup(String),

    #[error("unknown processor architecture: {0} (valid: msil, x86, amd64, ia64)")]
    UnknownProcessor(String),

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// Non-empty list of validation errors, in discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Returns `None` for an empty list
    pub fn new(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
