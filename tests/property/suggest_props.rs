//! Suggestion invariants.

use proptest::prelude::*;
use sift::suggest;
use std::collections::HashSet;

use super::strategies::{catalog, query};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: queries under two characters never get suggestions.
    #[test]
    fn prop_short_query_floor(q in "\\PC{0,1}", records in catalog(), max in 0usize..20) {
        prop_assert!(suggest(&q, &records, max).is_empty());
    }

    /// Property: at most `max` suggestions, all distinct, lowercase, and long enough.
    #[test]
    fn prop_suggestions_well_formed(q in query(), records in catalog(), max in 0usize..20) {
        let suggestions = suggest(&q, &records, max);
        prop_assert!(suggestions.len() <= max);

        let distinct: HashSet<&String> = suggestions.iter().collect();
        prop_assert_eq!(distinct.len(), suggestions.len());

        for s in &suggestions {
            prop_assert!(s.chars().count() >= 3, "short suggestion {:?}", s);
            prop_assert_eq!(s, &s.to_lowercase());
        }
    }

    /// Property: every suggestion starts with the query's first two characters.
    #[test]
    fn prop_suggestions_share_prefix(q in "[a-z]{2,6}", records in catalog()) {
        let prefix: String = q.chars().take(2).collect();
        for s in suggest(&q, &records, 20) {
            prop_assert!(s.starts_with(&prefix), "{:?} does not start with {:?}", s, prefix);
        }
    }
}
