//! Domain Services
//!
//! Pure functions over parameters, candidates and owned documents.

mod certificate_resolver;
mod deployment_transformer;
mod manifest_transformer;

pub use certificate_resolver::resolve_certificate;
pub use deployment_transformer::apply_deployment;
pub use manifest_transformer::apply_manifest;
