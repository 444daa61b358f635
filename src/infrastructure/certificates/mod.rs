//! `CertificateStore` implementations

mod inventory;
mod powershell;

pub use inventory::InventoryCertificateStore;
pub use powershell::{parse_certificate_json, PowerShellCertificateStore};
