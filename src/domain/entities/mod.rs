//! Domain Entities
//!
//! - `RawParameters` / `DeploymentParameters` - what to package, before and after validation
//! - `GroupAssignments` - optional download groups
//! - `CertificateCandidate` - a signing certificate found in a store
//! - `ValidationError` - one problem with the parameters

mod certificate;
mod groups;
mod parameters;
mod validation;

pub use certificate::{common_name, CertificateCandidate, SigningIdentity};
pub use groups::{parse_group_argument, same_file_name, Group, GroupAssignments};
pub use parameters::{
    validate, DeploymentParameters, DerivedPaths, RawParameters, ValidationReport,
    DEFAULT_TIMESTAMP_URL,
};
pub use validation::{RequiredField, ValidationError, ValidationErrors};
