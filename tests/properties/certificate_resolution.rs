//! Property tests for certificate selection.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use clickonce::domain::entities::{CertificateCandidate, SigningIdentity};
use clickonce::domain::services::resolve_certificate;
use clickonce::domain::value_objects::CertHash;
use clickonce::PackageError;

const NAMES: [&str; 3] = ["Example Pty Ltd", "EXAMPLE PTY LTD", "Other Corp"];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

/// Candidates with windows spread around `now`, hash = index
fn candidates() -> impl Strategy<Value = Vec<CertificateCandidate>> {
    proptest::collection::vec((0usize..3, -400i64..400, 1i64..800), 0..=10).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (name, start, length))| {
                let not_before = now() + Duration::days(start);
                CertificateCandidate::new(
                    NAMES[name],
                    not_before,
                    not_before + Duration::days(length),
                    CertHash::new(&format!("{:02X}", i)),
                )
            })
            .collect()
    })
}

fn matches(candidate: &CertificateCandidate) -> bool {
    candidate.common_name.eq_ignore_ascii_case(NAMES[0])
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Selection fails exactly when no matching candidate is valid now,
    /// and otherwise picks the first valid match with the latest expiry.
    #[test]
    fn property_selects_latest_expiring_valid_match(pool in candidates()) {
        let identity = SigningIdentity::CommonName(NAMES[0].to_string());
        let result = resolve_certificate(&identity, &pool, now());

        let valid: Vec<&CertificateCandidate> = pool
            .iter()
            .filter(|c| matches(c) && c.is_valid_at(now()))
            .collect();

        match valid.iter().map(|c| c.not_after).max() {
            Some(latest) => {
                let expected = valid.iter().find(|c| c.not_after == latest).unwrap();
                prop_assert_eq!(result.unwrap(), expected.hash.clone());
            }
            None if pool.iter().any(matches) => {
                let is_expired = matches!(result, Err(PackageError::CertificateExpired { .. }));
                prop_assert!(is_expired);
            }
            None => {
                let is_not_found = matches!(result, Err(PackageError::CertificateNotFound { .. }));
                prop_assert!(is_not_found);
            }
        }
    }

    /// PROPERTY: An explicit hash is returned untouched whatever the pool holds.
    #[test]
    fn property_explicit_hash_ignores_pool(pool in candidates(), raw in "[0-9a-fA-F: ]{1,16}") {
        let identity = SigningIdentity::Hash(CertHash::verbatim(raw.clone()));
        let hash = resolve_certificate(&identity, &pool, now()).unwrap();
        prop_assert_eq!(hash.as_str(), raw.as_str());
    }
}
