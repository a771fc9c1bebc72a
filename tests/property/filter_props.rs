//! Filter and sort invariants.

use proptest::prelude::*;
use sift::filter_and_sort;

use super::strategies::{catalog, filter_options};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: applying the same options twice changes nothing.
    #[test]
    fn prop_filter_idempotent(records in catalog(), options in filter_options()) {
        let once = filter_and_sort(&records, &options);
        let twice = filter_and_sort(&once, &options);
        prop_assert_eq!(once, twice);
    }

    /// Property: output is a subset of input, all in the requested category.
    #[test]
    fn prop_filter_subset(records in catalog(), options in filter_options()) {
        let out = filter_and_sort(&records, &options);
        prop_assert!(out.len() <= records.len());
        for r in &out {
            prop_assert!(records.contains(r));
            if let Some(category) = options.active_category() {
                prop_assert_eq!(r.category.as_str(), category);
            }
        }
    }
}
