// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: score everything, drop the zeros, sort by score.
//!
//! Sort order is score descending, then input order. The sort is stable, so
//! equal scores never swap, and ranking the same input twice gives the same
//! output. Nothing here holds state; call it from as many threads as you like.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use super::core::score_at;
use crate::types::Record;

/// A record's position in the input plus its score.
///
/// Only lives for one ranking pass. Callers get records back, not scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    pub index: usize,
    pub score: f64,
}

/// Compare two candidates for ranking: higher score first.
///
/// Input order is the tiebreaker, and `sort_by` is stable, so equal scores
/// keep their relative order without comparing indices explicitly.
pub fn compare_candidates(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score.total_cmp(&a.score)
}

/// Score and order `records` for `query`. Zero-score records are excluded.
pub fn rank_candidates(query: &str, records: &[Record], now: DateTime<Utc>) -> Vec<ScoredCandidate> {
    let mut candidates: Vec<ScoredCandidate> = records
        .iter()
        .enumerate()
        .map(|(index, record)| ScoredCandidate {
            index,
            score: score_at(query, record, now),
        })
        .filter(|candidate| candidate.score > 0.0)
        .collect();
    candidates.sort_by(compare_candidates);
    candidates
}

/// Rank `records` for `query`, best match first.
pub fn rank(query: &str, records: &[Record]) -> Vec<Record> {
    rank_at(query, records, Utc::now())
}

/// [`rank`] with an explicit clock.
pub fn rank_at(query: &str, records: &[Record], now: DateTime<Utc>) -> Vec<Record> {
    rank_candidates(query, records, now)
        .into_iter()
        .map(|candidate| records[candidate.index].clone())
        .collect()
}

/// Like [`rank`], but keeps the scores.
pub fn rank_scored(query: &str, records: &[Record]) -> Vec<(Record, f64)> {
    rank_candidates(query, records, Utc::now())
        .into_iter()
        .map(|candidate| (records[candidate.index].clone(), candidate.score))
        .collect()
}
