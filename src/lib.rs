//! clickonce - generate signed ClickOnce deployment packages
//!
//! Takes a directory of built binaries and produces an application
//! manifest, a deployment descriptor and the staged payload, driving the
//! Windows SDK `mage.exe` tool and patching its output.
//!
//! ## Layers
//!
//! - `domain` - parameters, certificate selection, descriptor transformers
//! - `application` - the packaging use case
//! - `infrastructure` - file systems, `mage.exe`, certificate stores
//! - `presentation` - CLI, logging, output
//! - `xml` - owned, namespace-aware XML documents

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod xml;

// Re-exports for convenience
pub use application::{PackageReport, PackageUseCase};
pub use config::{Config, ConfigWarning};
pub use domain::entities::{DeploymentParameters, RawParameters, ValidationErrors};
pub use error::{PackageError, PackageResult};
