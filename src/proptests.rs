//! Property-Based Tests for version ordering and gates
//!
//! # Running the Tests
//!
//! ```bash
//! cargo test --lib proptests
//! ```

use proptest::prelude::*;
use std::cmp::Ordering;

use crate::version::{compare, ServerVersion, VersionGate};

// Helper: Generate `major.minor.patch` triples
fn arb_triple() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u64..20, 0u64..20, 0u64..200)
}

// Helper: Generate version strings, sometimes with a pre-release
fn arb_version() -> impl Strategy<Value = String> {
    (arb_triple(), prop::option::of("(alpha|beta|rc)[0-9]")).prop_map(|((a, b, c), pre)| {
        match pre {
            Some(pre) => format!("{a}.{b}.{c}{pre}"),
            None => format!("{a}.{b}.{c}"),
        }
    })
}

proptest! {
    /// Released versions order like their numeric triples
    #[test]
    fn prop_order_matches_tuples(x in arb_triple(), y in arb_triple()) {
        let a = format!("{}.{}.{}", x.0, x.1, x.2);
        let b = format!("{}.{}.{}", y.0, y.1, y.2);
        prop_assert_eq!(compare(&a, &b).unwrap(), x.cmp(&y));
    }

    /// Comparison is antisymmetric
    #[test]
    fn prop_compare_antisymmetric(a in arb_version(), b in arb_version()) {
        prop_assert_eq!(compare(&a, &b).unwrap(), compare(&b, &a).unwrap().reverse());
    }

    /// Comparison is transitive
    #[test]
    fn prop_compare_transitive(a in arb_version(), b in arb_version(), c in arb_version()) {
        let mut versions = [
            ServerVersion::parse(&a).unwrap(),
            ServerVersion::parse(&b).unwrap(),
            ServerVersion::parse(&c).unwrap(),
        ];
        versions.sort();
        prop_assert!(versions[0] <= versions[1]);
        prop_assert!(versions[1] <= versions[2]);
        prop_assert!(versions[0] <= versions[2]);
    }

    /// A pre-release sorts before its release
    #[test]
    fn prop_prerelease_before_release(x in arb_triple(), pre in "(alpha|beta|rc)[0-9]") {
        let release = format!("{}.{}.{}", x.0, x.1, x.2);
        let candidate = format!("{release}{pre}");
        prop_assert_eq!(compare(&candidate, &release).unwrap(), Ordering::Less);
    }

    /// Exactly one of the two gates skips for any pair
    #[test]
    fn prop_gates_are_complementary(server in arb_version(), threshold in arb_version()) {
        let at_least = VersionGate::SkipIfAtLeast.evaluate(&server, &threshold, "x").unwrap();
        let less = VersionGate::SkipIfLessThan.evaluate(&server, &threshold, "x").unwrap();
        prop_assert!(at_least.is_some() != less.is_some());
    }

    /// The "skip if >= 5.0.0" gate skips exactly from 5.0.0 on
    #[test]
    fn prop_skip_from_five(x in arb_triple()) {
        let server = format!("{}.{}.{}", x.0, x.1, x.2);
        let skip = VersionGate::SkipIfAtLeast.evaluate(&server, "5.0.0", "x").unwrap();
        prop_assert_eq!(skip.is_some(), x >= (5, 0, 0));
    }
}
