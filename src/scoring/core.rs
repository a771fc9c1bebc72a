// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind catalog ranking.
//!
//! A record's score is a plain sum of independent bonuses:
//!
//! | Bonus              | Name  | Description | Author | Category |
//! |--------------------|-------|-------------|--------|----------|
//! | Substring match    | 100   | 50          | 25     | 75       |
//! | Char overlap (max) | 50    | 25          | 15     | 35       |
//!
//! plus popularity (`log10(stars + 1) * 5`, `log10(downloads + 1) * 3`) and
//! recency (+10 under 30 days, +5 under 90 days).
//!
//! The character-overlap term is deliberately loose: each query character
//! counts if it appears *anywhere* in the field, regardless of position or
//! order. Query `"e"` gives nearly every record some overlap. That looseness is
//! the fuzziness; swapping it for edit distance would reorder results.
//!
//! # Invariants
//!
//! - Scores are finite and `>= 0`. Every term is a non-negative constant, a
//!   ratio in `[0, 1]` times a positive weight, or `log10(n + 1)` with `n >= 0`.
//! - An empty or whitespace-only query scores 0 against everything. Without
//!   the guard the overlap ratio would be `0 / 0`.

use chrono::{DateTime, Utc};

use crate::types::Record;
use crate::utils::{cap_query, normalize, parse_timestamp, MAX_QUERY_LEN};

// =============================================================================
// SCORING CONSTANTS
// =============================================================================

/// Bonus when the whole query is a substring of the name.
pub const NAME_SUBSTRING_BONUS: f64 = 100.0;
pub const DESCRIPTION_SUBSTRING_BONUS: f64 = 50.0;
pub const AUTHOR_SUBSTRING_BONUS: f64 = 25.0;
pub const CATEGORY_SUBSTRING_BONUS: f64 = 75.0;

/// Maximum character-overlap bonus per field (reached when every query
/// character occurs somewhere in the field).
pub const NAME_OVERLAP_WEIGHT: f64 = 50.0;
pub const DESCRIPTION_OVERLAP_WEIGHT: f64 = 25.0;
pub const AUTHOR_OVERLAP_WEIGHT: f64 = 15.0;
pub const CATEGORY_OVERLAP_WEIGHT: f64 = 35.0;

pub const STARS_WEIGHT: f64 = 5.0;
pub const DOWNLOADS_WEIGHT: f64 = 3.0;

/// Updated within this many days: [`RECENT_BONUS`].
pub const RECENT_DAYS: f64 = 30.0;
pub const RECENT_BONUS: f64 = 10.0;
/// Updated within this many days (but not recently): [`FRESH_BONUS`].
pub const FRESH_DAYS: f64 = 90.0;
pub const FRESH_BONUS: f64 = 5.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Substring bonus and overlap weight for one scored field.
#[derive(Debug, Clone, Copy)]
struct FieldWeights {
    substring: f64,
    overlap: f64,
}

const NAME: FieldWeights = FieldWeights {
    substring: NAME_SUBSTRING_BONUS,
    overlap: NAME_OVERLAP_WEIGHT,
};
const DESCRIPTION: FieldWeights = FieldWeights {
    substring: DESCRIPTION_SUBSTRING_BONUS,
    overlap: DESCRIPTION_OVERLAP_WEIGHT,
};
const AUTHOR: FieldWeights = FieldWeights {
    substring: AUTHOR_SUBSTRING_BONUS,
    overlap: AUTHOR_OVERLAP_WEIGHT,
};
const CATEGORY: FieldWeights = FieldWeights {
    substring: CATEGORY_SUBSTRING_BONUS,
    overlap: CATEGORY_OVERLAP_WEIGHT,
};

/// Relevance of `record` for `query`, measured against the current time.
///
/// `0.0` means "not a match"; ranking drops such records.
pub fn score(query: &str, record: &Record) -> f64 {
    score_at(query, record, Utc::now())
}

/// [`score`] with an explicit clock, for the recency bonus.
pub fn score_at(query: &str, record: &Record, now: DateTime<Utc>) -> f64 {
    let query = cap_query(query, MAX_QUERY_LEN);
    if query.trim().is_empty() {
        return 0.0;
    }

    let query = normalize(query);
    let query_chars: Vec<char> = query.chars().collect();

    let fields = [
        (normalize(&record.name), NAME),
        (normalize(&record.description), DESCRIPTION),
        (normalize(record.author_or_empty()), AUTHOR),
        (normalize(&record.category), CATEGORY),
    ];

    let mut total = 0.0;
    for (text, weights) in &fields {
        if text.contains(query.as_str()) {
            total += weights.substring;
        }
        total += char_overlap(&query_chars, text) * weights.overlap;
    }

    total + popularity_bonus(record) + recency_bonus(record, now)
}

/// Fraction of query characters (with repetition) found anywhere in `text`.
///
/// Returns a value in `[0, 1]`; `0` for an empty character list.
pub fn char_overlap(query_chars: &[char], text: &str) -> f64 {
    if query_chars.is_empty() {
        return 0.0;
    }
    let matched = query_chars.iter().filter(|&&c| text.contains(c)).count();
    matched as f64 / query_chars.len() as f64
}

/// Log-scaled stars and downloads. Missing counts contribute nothing.
pub fn popularity_bonus(record: &Record) -> f64 {
    let stars = record
        .stars
        .map_or(0.0, |stars| (stars as f64 + 1.0).log10() * STARS_WEIGHT);
    let downloads = record
        .downloads
        .map_or(0.0, |downloads| (downloads as f64 + 1.0).log10() * DOWNLOADS_WEIGHT);
    stars + downloads
}

/// Freshness bonus from `last_updated`. Unparseable dates contribute nothing.
///
/// Dates in the future count as "recent".
pub fn recency_bonus(record: &Record, now: DateTime<Utc>) -> f64 {
    let Some(updated) = record.last_updated.as_deref().and_then(parse_timestamp) else {
        return 0.0;
    };
    let days = (now - updated).num_milliseconds() as f64 / MILLIS_PER_DAY;
    if days < RECENT_DAYS {
        RECENT_BONUS
    } else if days < FRESH_DAYS {
        FRESH_BONUS
    } else {
        0.0
    }
}
