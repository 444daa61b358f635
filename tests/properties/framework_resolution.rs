//! Property tests for compatible framework resolution.

use proptest::prelude::*;

use clickonce::domain::value_objects::{resolve_compatible, TargetFramework};

fn known_identifier() -> impl Strategy<Value = String> {
    proptest::sample::select(TargetFramework::ALL.to_vec()).prop_map(|f| f.identifier().to_string())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Known identifiers always resolve, without repeats, keeping first-seen order.
    #[test]
    fn property_known_identifiers_resolve_in_order(
        requested in proptest::collection::vec(known_identifier(), 1..=12),
    ) {
        let resolved = resolve_compatible(&requested).unwrap();

        let mut first_seen: Vec<String> = Vec::new();
        for id in &requested {
            if !first_seen.contains(id) {
                first_seen.push(id.clone());
            }
        }
        let ids: Vec<&str> = resolved.iter().map(|f| f.identifier()).collect();
        let first_seen_strs: Vec<&str> = first_seen.iter().map(String::as_str).collect();
        prop_assert_eq!(&ids[..first_seen.len()], first_seen_strs.as_slice());

        for (i, framework) in resolved.iter().enumerate() {
            prop_assert!(!resolved[i + 1..].contains(framework));
        }
    }

    /// PROPERTY: The client profile is never advertised without the full profile.
    #[test]
    fn property_client_profile_implies_full(
        requested in proptest::collection::vec(known_identifier(), 1..=12),
    ) {
        let resolved = resolve_compatible(&requested).unwrap();
        if resolved.contains(&TargetFramework::V40Client) {
            prop_assert!(resolved.contains(&TargetFramework::V40Full));
        }
        let extra = resolved.len() - {
            let mut unique = requested.clone();
            unique.sort();
            unique.dedup();
            unique.len()
        };
        prop_assert!(extra <= 1);
    }

    /// PROPERTY: Any unknown identifier fails the batch and every unknown is named.
    #[test]
    fn property_unknown_identifiers_are_all_reported(
        known in proptest::collection::vec(known_identifier(), 0..=6),
        unknown in proptest::collection::vec("[a-z]{1,6}", 1..=4),
    ) {
        let mut requested = known.clone();
        requested.extend(unknown.iter().cloned());

        let errors = resolve_compatible(&requested).unwrap_err();
        let reported: Vec<String> = errors.into_iter().map(|e| e.0).collect();
        prop_assert_eq!(reported, unknown);
    }
}
