//! Certificate Resolver
//!
//! Picks the certificate hash to sign with. An explicit hash is used as-is;
//! a common name is looked up in the candidate pool with a single scan that
//! keeps a running best:
//!
//! - the first matching candidate becomes best, valid or not
//! - while the best is invalid, any later match replaces it
//! - a valid best is only replaced by a valid match that expires strictly later
//!
//! The scan never fails early. Only the final best is checked, so a valid
//! match always wins over an expired one regardless of order.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::entities::{CertificateCandidate, SigningIdentity};
use crate::domain::value_objects::CertHash;
use crate::error::{PackageError, PackageResult};

pub fn resolve_certificate(
    identity: &SigningIdentity,
    candidates: &[CertificateCandidate],
    now: DateTime<Utc>,
) -> PackageResult<CertHash> {
    let name = match identity {
        SigningIdentity::Hash(hash) => {
            debug!(hash = %hash, "using certificate hash as given");
            return Ok(hash.clone());
        }
        SigningIdentity::CommonName(name) => name,
    };

    let mut best: Option<&CertificateCandidate> = None;
    for candidate in candidates.iter().filter(|c| same_name(&c.common_name, name)) {
        debug!(
            common_name = %candidate.common_name,
            not_before = %candidate.not_before,
            not_after = %candidate.not_after,
            hash = %candidate.hash,
            "found certificate"
        );
        if should_replace(best, candidate, now) {
            best = Some(candidate);
        }
    }

    let Some(best) = best else {
        return Err(PackageError::CertificateNotFound {
            identity: name.clone(),
        });
    };
    if !best.is_valid_at(now) {
        return Err(PackageError::CertificateExpired {
            identity: name.clone(),
        });
    }

    debug!(hash = %best.hash, not_after = %best.not_after, "selected certificate");
    Ok(best.hash.clone())
}

fn should_replace(
    best: Option<&CertificateCandidate>,
    candidate: &CertificateCandidate,
    now: DateTime<Utc>,
) -> bool {
    match best {
        None => true,
        Some(best) if !best.is_valid_at(now) => true,
        Some(best) => candidate.is_valid_at(now) && candidate.not_after > best.not_after,
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
