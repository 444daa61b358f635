//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, in-memory)
//! - `tool/` - mage.exe discovery and invocation
//! - `certificates/` - Certificate stores (PowerShell, inventory file)

pub mod certificates;
pub mod fs;
pub mod tool;

// Re-export for convenience
pub use certificates::{InventoryCertificateStore, PowerShellCertificateStore};
pub use fs::{LocalFs, MemoryFs};
pub use tool::{MageLocator, MageTool};
