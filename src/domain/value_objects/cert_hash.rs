//! Certificate Hash Value Object
//!
//! The thumbprint handed to the signer. Thumbprints read from a store are
//! normalised to upper-case without separators; a hash typed by the user
//! is kept exactly as given.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Certificate content hash (thumbprint)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CertHash(String);

impl CertHash {
    /// Normalise a thumbprint: drop whitespace and `:` separators, upper-case
    pub fn new(raw: &str) -> Self {
        let normalized = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ':')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self(normalized)
    }

    /// Keep `raw` exactly as supplied
    pub fn verbatim(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CertHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CertHash {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&str> for CertHash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<CertHash> for String {
    fn from(hash: CertHash) -> Self {
        hash.0
    }
}

impl AsRef<str> for CertHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_upper_cases() {
        assert_eq!(CertHash::new("ab12cd").as_str(), "AB12CD");
    }

    #[test]
    fn new_strips_separators() {
        assert_eq!(CertHash::new("ab 12:cd").as_str(), "AB12CD");
    }

    #[test]
    fn verbatim_keeps_input() {
        assert_eq!(CertHash::verbatim("ab:cd ef").as_str(), "ab:cd ef");
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(CertHash::new("  ").is_empty());
    }

    #[test]
    fn deserializes_from_string() {
        let hash: CertHash = serde_json::from_str("\"0a:0b\"").unwrap();
        assert_eq!(hash, CertHash::new("0A0B"));
    }
}
