// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Category filter and field sort, independent of ranking.
//!
//! Works on a copy: the input slice is never reordered. Sorting is stable, so
//! applying the same options to already-filtered output changes nothing.

use std::cmp::Ordering;

use crate::types::{FilterOptions, Record, SortBy, SortOrder};
use crate::utils::{normalize, timestamp_millis};

/// Filter by category, then sort by the requested field.
///
/// - Category `"All"` or `None`: no filtering.
/// - Names compare case-insensitively; missing counts sort as 0; missing or
///   unparseable dates sort as the epoch.
/// - Order defaults to descending.
/// - `SortBy::Unknown` keeps the filtered order.
pub fn filter_and_sort(records: &[Record], options: &FilterOptions) -> Vec<Record> {
    let mut out: Vec<Record> = match options.active_category() {
        Some(category) => records
            .iter()
            .filter(|record| record.category == category)
            .cloned()
            .collect(),
        None => records.to_vec(),
    };

    if let Some(sort_by) = options.sort_by {
        sort_records(&mut out, sort_by, options.sort_order.unwrap_or_default());
    }

    out
}

/// Stable in-place sort by one field.
pub fn sort_records(records: &mut [Record], sort_by: SortBy, order: SortOrder) {
    if sort_by == SortBy::Unknown {
        return;
    }
    match order {
        SortOrder::Asc => records.sort_by(|a, b| compare_by(a, b, sort_by)),
        SortOrder::Desc => records.sort_by(|a, b| compare_by(b, a, sort_by)),
    }
}

fn compare_by(a: &Record, b: &Record, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Name => normalize(&a.name).cmp(&normalize(&b.name)),
        SortBy::Stars => a.stars.unwrap_or(0).cmp(&b.stars.unwrap_or(0)),
        SortBy::Downloads => a.downloads.unwrap_or(0).cmp(&b.downloads.unwrap_or(0)),
        SortBy::LastUpdated => timestamp_millis(a.last_updated.as_deref())
            .cmp(&timestamp_millis(b.last_updated.as_deref())),
        SortBy::Unknown => Ordering::Equal,
    }
}
