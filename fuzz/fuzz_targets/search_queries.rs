// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for ranking and suggestions over a fixed catalog.
//!
//! Any query must rank without panicking, keep only positive scores in
//! descending order, and produce well-formed suggestions.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sift::scoring::ranking::rank_candidates;
use sift::testing::{fixed_now, sample_catalog};
use sift::{suggest, Record};

fuzz_target!(|query: &[u8]| {
    static CATALOG: std::sync::OnceLock<Vec<Record>> = std::sync::OnceLock::new();
    let catalog = CATALOG.get_or_init(sample_catalog);

    let query = String::from_utf8_lossy(query);

    let ranked = rank_candidates(&query, catalog, fixed_now());
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!(ranked.iter().all(|c| c.score > 0.0 && c.index < catalog.len()));

    let suggestions = suggest(&query, catalog, 8);
    assert!(suggestions.len() <= 8);
    assert!(suggestions.iter().all(|s| s.chars().count() >= 3));
});
