// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Autocomplete suggestions: words from the catalog that start like the query.
//!
//! Tokens come from name, description, category and author, split on anything
//! that isn't `[A-Za-z0-9_]`. A token qualifies when it has at least three
//! characters and starts with the first two characters of the query. Only the
//! first two characters matter: "rux" and "rust" suggest the same words.

use std::collections::HashSet;

use crate::types::Record;
use crate::utils::{cap_query, is_word_char, normalize, MAX_QUERY_LEN};

/// Suggestions returned when the caller doesn't say otherwise.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;

/// Queries shorter than this get no suggestions.
pub const MIN_SUGGEST_QUERY_CHARS: usize = 2;

/// Tokens shorter than this are never suggested.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Up to `max_results` distinct tokens for `query`, in first-seen order.
///
/// Records are walked in input order, fields in the order name, description,
/// category, author. Missing authors are treated as empty.
pub fn suggest(query: &str, records: &[Record], max_results: usize) -> Vec<String> {
    let query = cap_query(query, MAX_QUERY_LEN);
    if max_results == 0 || query.chars().count() < MIN_SUGGEST_QUERY_CHARS {
        return Vec::new();
    }

    let prefix: String = normalize(query).chars().take(MIN_SUGGEST_QUERY_CHARS).collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut suggestions = Vec::new();

    for record in records {
        let fields = [
            record.name.as_str(),
            record.description.as_str(),
            record.category.as_str(),
            record.author_or_empty(),
        ];
        for field in fields {
            let lowered = normalize(field);
            for token in lowered.split(|c: char| !is_word_char(c)) {
                if token.chars().count() < MIN_TOKEN_CHARS || !token.starts_with(prefix.as_str()) {
                    continue;
                }
                if seen.insert(token.to_string()) {
                    suggestions.push(token.to_string());
                    if suggestions.len() == max_results {
                        return suggestions;
                    }
                }
            }
        }
    }

    suggestions
}
