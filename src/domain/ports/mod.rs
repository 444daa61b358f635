//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod certificate_store;
pub mod descriptor_tool;
pub mod file_system;

pub use certificate_store::CertificateStore;
pub use descriptor_tool::DescriptorTool;
pub use file_system::{FileSystem, FsError, FsResult};
