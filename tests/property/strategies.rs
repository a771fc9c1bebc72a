//! Generators shared by the property suites.

use proptest::prelude::*;
use sift::{FilterOptions, Record, SortBy, SortOrder};

pub const CATEGORIES: &[&str] = &["ide-integration", "workflow", "testing", "mcp-servers", "All"];

/// Random word-like strings.
pub fn word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9]{1,8}").unwrap()
}

/// Free text with separators, the way names and descriptions look.
pub fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 0..6).prop_map(|words| words.join(" "))
}

/// Arbitrary queries, including blanks, punctuation and non-ASCII.
pub fn query() -> impl Strategy<Value = String> {
    prop_oneof![
        word(),
        text(),
        Just(String::new()),
        Just("   ".to_string()),
        "\\PC{0,12}",
    ]
}

fn date() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        (2023u32..2026, 1u32..13, 1u32..29).prop_map(|(y, m, d)| Some(format!("{:04}-{:02}-{:02}", y, m, d))),
        Just(Some("not a date".to_string())),
    ]
}

pub fn record() -> impl Strategy<Value = Record> {
    (
        word(),
        text(),
        text(),
        prop::sample::select(CATEGORIES),
        prop::option::of(word()),
        prop::option::of(0u64..1_000_000),
        prop::option::of(0u64..10_000_000),
        date(),
    )
        .prop_map(|(id, name, description, category, author, stars, downloads, last_updated)| {
            let mut record = Record::new(&id, &name, &description, category);
            record.author = author;
            record.stars = stars;
            record.downloads = downloads;
            record.last_updated = last_updated;
            record
        })
}

pub fn catalog() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record(), 0..12)
}

pub fn filter_options() -> impl Strategy<Value = FilterOptions> {
    (
        prop::option::of(prop::sample::select(CATEGORIES).prop_map(str::to_string)),
        prop::option::of(prop::sample::select(vec![
            SortBy::Name,
            SortBy::Stars,
            SortBy::Downloads,
            SortBy::LastUpdated,
            SortBy::Unknown,
        ])),
        prop::option::of(prop::sample::select(vec![SortOrder::Asc, SortOrder::Desc])),
    )
        .prop_map(|(category, sort_by, sort_order)| FilterOptions {
            category,
            sort_by,
            sort_order,
        })
}
