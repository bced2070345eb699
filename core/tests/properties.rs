//! Property-based tests for the core value types.
//!
//! 1. Semantic versions survive a display/parse round trip.
//! 2. Release ordering agrees with numeric tuple ordering.
//! 3. A prerelease sorts before its release.
//! 4. Merging dictionaries with disjoint locales is commutative.
//! 5. Merging keeps every string of both sides.
//! 6. Periods accept ordered bounds and reject reversed ones.
//! 7. Sentinel bounds never trigger the ordering check.

use odt_commons_core::{Dict, Locale, PeriodOfTime, SemVersion, UNBOUNDED_DATE, UNKNOWN_DATE};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn prerelease_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z][a-z0-9]{0,7}"]
}

fn texts_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-zA-Z ]{0,12}", 0..4)
}

fn date_strategy() -> impl Strategy<Value = (i32, u32, u32)> {
    (1900i32..=2100, 1u32..=12, 1u32..=28)
}

fn iso_date((y, m, d): (i32, u32, u32)) -> String {
    format!("{y:04}-{m:02}-{d:02}")
}

// ── Versions ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn version_display_parse_round_trip(
        major in 0u32..1000,
        minor in 0u32..1000,
        patch in 0u32..1000,
        pre in prerelease_strategy(),
    ) {
        let version = SemVersion::new(major, minor, patch, pre).unwrap();
        let parsed = SemVersion::parse(&version.to_string()).unwrap();
        prop_assert_eq!(parsed, version);
    }

    #[test]
    fn release_ordering_matches_tuples(
        a in (0u32..20, 0u32..20, 0u32..20),
        b in (0u32..20, 0u32..20, 0u32..20),
    ) {
        let va = SemVersion::release(a.0, a.1, a.2);
        let vb = SemVersion::release(b.0, b.1, b.2);
        prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
    }

    #[test]
    fn prerelease_precedes_release(
        major in 0u32..100,
        minor in 0u32..100,
        patch in 0u32..100,
        pre in "[a-z]{1,8}",
    ) {
        let pre = SemVersion::new(major, minor, patch, pre).unwrap();
        prop_assert!(pre < SemVersion::release(major, minor, patch));
    }
}

// ── Dictionaries ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn disjoint_merge_is_commutative(
        en in texts_strategy(),
        it in texts_strategy(),
        fr in texts_strategy(),
        de in texts_strategy(),
    ) {
        let left = Dict::builder()
            .put_all(Locale::ENGLISH, en)
            .put_all(Locale::ITALIAN, it)
            .build();
        let right = Dict::builder()
            .put_all(Locale::FRENCH, fr)
            .put_all(Locale::GERMAN, de)
            .build();

        prop_assert_eq!(left.with_dict(&right), right.with_dict(&left));
        prop_assert_eq!(
            Dict::of_dicts([&left, &right]),
            Dict::of_dicts([&right, &left])
        );
    }

    #[test]
    fn merge_keeps_every_string(a in texts_strategy(), b in texts_strategy()) {
        let left = Dict::of_locale(Locale::ENGLISH, a.clone());
        let right = Dict::of_locale(Locale::ENGLISH, b.clone());
        let merged = left.with_dict(&right);

        let expected: Vec<String> = a.into_iter().chain(b).collect();
        prop_assert_eq!(merged.get(&Locale::ENGLISH), expected.as_slice());
    }
}

// ── Periods ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn ordered_bounds_are_accepted(a in date_strategy(), b in date_strategy()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(PeriodOfTime::of(iso_date(lo), iso_date(hi)).is_ok());
        if lo != hi {
            prop_assert!(PeriodOfTime::of(iso_date(hi), iso_date(lo)).is_err());
        }
    }

    #[test]
    fn sentinels_skip_ordering_check(
        d in date_strategy(),
        sentinel in prop_oneof![Just(UNKNOWN_DATE), Just(UNBOUNDED_DATE)],
    ) {
        prop_assert!(PeriodOfTime::of(iso_date(d), sentinel).is_ok());
        prop_assert!(PeriodOfTime::of(sentinel, iso_date(d)).is_ok());
    }
}
