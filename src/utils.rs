// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! String and time helpers shared by scoring, suggestions and sorting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Longest query the engine will look at, in characters.
///
/// Longer input is truncated rather than rejected. Rejecting overlong queries
/// is the caller's business; the engine just must not fall over.
pub const MAX_QUERY_LEN: usize = 200;

/// Normalize text for matching: lowercase only.
///
/// No diacritic stripping, no whitespace collapsing. Character-overlap scoring
/// counts every query character, spaces included.
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// Truncate `query` to at most `max_chars` characters, on a char boundary.
pub fn cap_query(query: &str, max_chars: usize) -> &str {
    match query.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &query[..byte_idx],
        None => query,
    }
}

/// Word characters for tokenization: ASCII letters, digits and underscore.
///
/// Everything else, including non-ASCII letters, is a separator.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse an ISO date or date-time. Naive values are taken as UTC.
///
/// Returns `None` for anything unparseable; callers treat that as "no date".
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Milliseconds since the Unix epoch, `0` when absent or unparseable.
pub fn timestamp_millis(value: Option<&str>) -> i64 {
    value
        .and_then(parse_timestamp)
        .map_or(0, |dt| dt.timestamp_millis())
}
