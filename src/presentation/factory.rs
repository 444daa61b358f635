//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::PackageUseCase;
use crate::config::Config;
use crate::domain::ports::CertificateStore;
use crate::infrastructure::{
    InventoryCertificateStore, LocalFs, MageLocator, MageTool, PowerShellCertificateStore,
};

/// Type alias for the concrete PackageUseCase with all dependencies
pub type ConcretePackageUseCase = PackageUseCase<MageTool, Box<dyn CertificateStore>, LocalFs>;

/// Create a package use case with all dependencies wired up
pub fn create_package_use_case(config: &Config) -> ConcretePackageUseCase {
    let file_system = LocalFs::new();
    let program = MageLocator::from_env(config.tool.mage_path.clone()).locate(&file_system);
    let tool = MageTool::new(program);

    PackageUseCase::new(tool, create_certificate_store(config), file_system)
}

/// Inventory file when one is configured, the Windows store otherwise
pub fn create_certificate_store(config: &Config) -> Box<dyn CertificateStore> {
    match &config.signing.inventory {
        Some(path) => Box::new(InventoryCertificateStore::new(path.clone())),
        None => Box::new(PowerShellCertificateStore::new()),
    }
}
