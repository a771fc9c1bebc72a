//! Relevance ranking: field weights, popularity, recency, ordering.

use super::common::{fixed_now, make_record, mixed_catalog, popular, sample_catalog};
use sift::scoring::{RECENT_BONUS, FRESH_BONUS};
use sift::{rank, rank_at, rank_scored, score_at, Record};

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_exact_name_match_ranks_first() {
    let ranked = rank("cline", &sample_catalog());
    assert_eq!(ranked[0].name, "cline/cline");
}

#[test]
fn test_name_match_beats_description_match() {
    let records = vec![
        make_record("desc", "unrelated", "a parser toolkit", "misc"),
        make_record("name", "parser", "unrelated", "misc"),
    ];
    let ranked = rank_at("parser", &records, fixed_now());
    assert_eq!(ids(&ranked), ["name", "desc"]);
}

#[test]
fn test_category_substring_counts() {
    let now = fixed_now();
    let in_category = make_record("1", "zzz", "", "testing");
    let elsewhere = make_record("2", "zzz", "", "misc");
    assert!(score_at("testing", &in_category, now) > score_at("testing", &elsewhere, now));
}

#[test]
fn test_author_substring_counts() {
    let now = fixed_now();
    let mut authored = make_record("1", "zzz", "", "misc");
    authored.author = Some("anthropic".to_string());
    let anonymous = make_record("2", "zzz", "", "misc");
    assert!(score_at("anthropic", &authored, now) > score_at("anthropic", &anonymous, now));
}

#[test]
fn test_query_is_case_insensitive() {
    let now = fixed_now();
    let record = &sample_catalog()[0];
    assert_eq!(score_at("CLINE", record, now), score_at("cline", record, now));
}

#[test]
fn test_popularity_breaks_text_ties() {
    let records = vec![
        popular("quiet", "widget", "misc", 3, 0, "2020-01-01"),
        popular("loud", "widget", "misc", 30_000, 0, "2020-01-01"),
    ];
    assert_eq!(ids(&rank_at("widget", &records, fixed_now())), ["loud", "quiet"]);
}

#[test]
fn test_recency_bonus_tiers() {
    let now = fixed_now();
    let undated = make_record("x", "widget", "", "misc");
    let with_date = |date: &str| {
        let mut record = undated.clone();
        record.last_updated = Some(date.to_string());
        record
    };
    let base = score_at("widget", &undated, now);

    let recent = score_at("widget", &with_date("2025-05-20T10:00:00Z"), now) - base;
    let fresh = score_at("widget", &with_date("2025-03-15"), now) - base;
    let stale = score_at("widget", &with_date("2024-01-01"), now) - base;
    let garbage = score_at("widget", &with_date("last tuesday"), now) - base;

    assert!((recent - RECENT_BONUS).abs() < 1e-9, "recent bonus was {}", recent);
    assert!((fresh - FRESH_BONUS).abs() < 1e-9, "fresh bonus was {}", fresh);
    assert!(stale.abs() < 1e-9);
    assert!(garbage.abs() < 1e-9);
}

#[test]
fn test_equal_scores_keep_input_order() {
    let records: Vec<Record> = ["first", "second", "third"]
        .iter()
        .map(|id| make_record(id, "same name", "same text", "misc"))
        .collect();
    assert_eq!(ids(&rank_at("same", &records, fixed_now())), ["first", "second", "third"]);
}

#[test]
fn test_blank_query_ranks_nothing() {
    let catalog = mixed_catalog();
    assert!(rank("", &catalog).is_empty());
    assert!(rank("   \t", &catalog).is_empty());
}

#[test]
fn test_zero_score_records_are_dropped() {
    let records = vec![
        make_record("hit", "cline", "", "misc"),
        make_record("miss", "zzz", "", "qqq"),
    ];
    assert_eq!(ids(&rank_at("cline", &records, fixed_now())), ["hit"]);
}

#[test]
fn test_rank_scored_is_descending_and_positive() {
    let scored = rank_scored("agent", &mixed_catalog());
    assert!(!scored.is_empty());
    assert!(scored.iter().all(|(_, score)| *score > 0.0));
    assert!(scored.windows(2).all(|pair| pair[0].1 >= pair[1].1));
}

#[test]
fn test_rank_does_not_mutate_input() {
    let catalog = mixed_catalog();
    let before = catalog.clone();
    let _ = rank("prompt", &catalog);
    assert_eq!(catalog, before);
}
