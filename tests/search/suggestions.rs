//! Autocomplete suggestions.

use super::common::{make_record, mixed_catalog, sample_catalog};
use sift::{suggest, DEFAULT_MAX_SUGGESTIONS};

#[test]
fn test_suggestions_follow_record_and_field_order() {
    assert_eq!(suggest("cl", &sample_catalog(), DEFAULT_MAX_SUGGESTIONS), ["cline", "claude"]);
}

#[test]
fn test_single_character_gets_nothing() {
    assert!(suggest("c", &mixed_catalog(), DEFAULT_MAX_SUGGESTIONS).is_empty());
    assert!(suggest("", &mixed_catalog(), DEFAULT_MAX_SUGGESTIONS).is_empty());
}

#[test]
fn test_short_tokens_are_skipped() {
    let records = vec![make_record("1", "ag ago agent", "", "misc")];
    assert_eq!(suggest("ag", &records, DEFAULT_MAX_SUGGESTIONS), ["ago", "agent"]);
}

#[test]
fn test_only_first_two_characters_matter() {
    let catalog = mixed_catalog();
    assert_eq!(
        suggest("prx", &catalog, DEFAULT_MAX_SUGGESTIONS),
        suggest("pr", &catalog, DEFAULT_MAX_SUGGESTIONS)
    );
}

#[test]
fn test_suggestions_are_lowercase_and_distinct() {
    let records = vec![
        make_record("1", "Claude", "CLAUDE claude", "misc"),
        make_record("2", "claude", "", "misc"),
    ];
    assert_eq!(suggest("CL", &records, DEFAULT_MAX_SUGGESTIONS), ["claude"]);
}

#[test]
fn test_author_is_a_source() {
    let mut record = make_record("1", "zzz", "", "misc");
    record.author = Some("paul-gauthier".to_string());
    assert_eq!(suggest("pa", &[record], DEFAULT_MAX_SUGGESTIONS), ["paul"]);
}

#[test]
fn test_max_results_truncates() {
    let records = vec![make_record("1", "alpha alps altar alto always", "", "misc")];
    assert_eq!(suggest("al", &records, 2), ["alpha", "alps"]);
    assert!(suggest("al", &records, 0).is_empty());
}
