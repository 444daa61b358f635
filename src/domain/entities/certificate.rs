//! Certificate candidates and the identity used to pick one

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::CertHash;

/// A certificate offered by a store, reduced to what selection needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateCandidate {
    pub common_name: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub hash: CertHash,
}

impl CertificateCandidate {
    pub fn new(
        common_name: impl Into<String>,
        not_before: DateTime<Utc>,
        not_after: DateTime<Utc>,
        hash: impl Into<CertHash>,
    ) -> Self {
        Self {
            common_name: common_name.into(),
            not_before,
            not_after,
            hash: hash.into(),
        }
    }

    /// Build a candidate from a full subject distinguished name
    pub fn from_subject(
        subject: &str,
        not_before: DateTime<Utc>,
        not_after: DateTime<Utc>,
        hash: impl Into<CertHash>,
    ) -> Self {
        Self::new(common_name(subject), not_before, not_after, hash)
    }

    /// Validity window is inclusive at both ends
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.not_before && now <= self.not_after
    }
}

/// First `CN=` component of a distinguished name, or "" when there is none.
///
/// Components are split on `,` only; quoted commas are not supported.
pub fn common_name(subject: &str) -> &str {
    subject
        .split(',')
        .map(str::trim_start)
        .find_map(|part| {
            let key = part.get(..3)?;
            key.eq_ignore_ascii_case("CN=").then(|| &part[3..])
        })
        .unwrap_or("")
}

/// How the signing certificate is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningIdentity {
    /// Thumbprint supplied up front; no store lookup
    Hash(CertHash),
    /// Common name to look up in the certificate store
    CommonName(String),
}

impl fmt::Display for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigningIdentity::Hash(hash) => write!(f, "hash {}", hash),
            SigningIdentity::CommonName(name) => write!(f, "{}", name),
        }
    }
}
