//! CertificateStore port - where signing certificates are enumerated

use crate::domain::entities::CertificateCandidate;
use crate::error::PackageResult;

/// Source of signing certificates
///
/// Implementations list every certificate they can see; choosing one is
/// left to `resolve_certificate`.
pub trait CertificateStore {
    fn candidates(&self) -> PackageResult<Vec<CertificateCandidate>>;
}

impl<T: CertificateStore + ?Sized> CertificateStore for &T {
    fn candidates(&self) -> PackageResult<Vec<CertificateCandidate>> {
        (**self).candidates()
    }
}

impl<T: CertificateStore + ?Sized> CertificateStore for Box<T> {
    fn candidates(&self) -> PackageResult<Vec<CertificateCandidate>> {
        (**self).candidates()
    }
}

impl CertificateStore for Vec<CertificateCandidate> {
    fn candidates(&self) -> PackageResult<Vec<CertificateCandidate>> {
        Ok(self.clone())
    }
}
