// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for score calculation invariants.
//!
//! Scores must be finite, non-negative, and deterministic, whatever ends up
//! in the query or the record's fields (including garbage timestamps).

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sift::testing::fixed_now;
use sift::{score_at, Record};

#[derive(Arbitrary, Debug)]
struct Input {
    query: String,
    name: String,
    description: String,
    category: String,
    author: Option<String>,
    stars: Option<u64>,
    downloads: Option<u64>,
    last_updated: Option<String>,
}

fuzz_target!(|input: Input| {
    let mut record = Record::new("fuzz", input.name, input.description, input.category);
    record.author = input.author;
    record.stars = input.stars;
    record.downloads = input.downloads;
    record.last_updated = input.last_updated;

    let now = fixed_now();
    let first = score_at(&input.query, &record, now);
    let second = score_at(&input.query, &record, now);

    assert!(first.is_finite(), "non-finite score {}", first);
    assert!(first >= 0.0, "negative score {}", first);
    assert_eq!(first.to_bits(), second.to_bits(), "score not deterministic");
    if input.query.trim().is_empty() {
        assert_eq!(first, 0.0);
    }
});
