//! Category filter and field sort.

use super::common::mixed_catalog;
use sift::{filter_and_sort, FilterOptions, Record, SortBy, SortOrder};

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_category_filter_keeps_relative_order() {
    let filtered = filter_and_sort(&mixed_catalog(), &FilterOptions::category("ide-integration"));
    assert_eq!(ids(&filtered), ["cline", "aider"]);
}

#[test]
fn test_all_category_is_no_filter() {
    let catalog = mixed_catalog();
    assert_eq!(filter_and_sort(&catalog, &FilterOptions::category("All")), catalog);
    assert_eq!(filter_and_sort(&catalog, &FilterOptions::default()), catalog);
}

#[test]
fn test_unmatched_category_is_empty() {
    assert!(filter_and_sort(&mixed_catalog(), &FilterOptions::category("nope")).is_empty());
}

#[test]
fn test_sort_by_stars_descending_by_default() {
    let options = FilterOptions {
        sort_by: Some(SortBy::Stars),
        ..FilterOptions::default()
    };
    let sorted = filter_and_sort(&mixed_catalog(), &options);
    assert_eq!(ids(&sorted), ["cline", "aider", "claude-task-master", "promptfoo", "bare"]);
}

#[test]
fn test_sort_by_name_ascending() {
    let sorted = filter_and_sort(&mixed_catalog(), &FilterOptions::sorted(SortBy::Name, SortOrder::Asc));
    assert_eq!(ids(&sorted), ["aider", "bare", "claude-task-master", "cline", "promptfoo"]);
}

#[test]
fn test_sort_by_last_updated_puts_undated_last() {
    let sorted = filter_and_sort(
        &mixed_catalog(),
        &FilterOptions::sorted(SortBy::LastUpdated, SortOrder::Desc),
    );
    assert_eq!(&ids(&sorted)[..2], ["promptfoo", "aider"]);
}

#[test]
fn test_unknown_sort_field_keeps_order() {
    let options: FilterOptions = serde_json::from_str(r#"{"sortBy":"color"}"#).unwrap();
    assert_eq!(options.sort_by, Some(SortBy::Unknown));
    let catalog = mixed_catalog();
    assert_eq!(filter_and_sort(&catalog, &options), catalog);
}

#[test]
fn test_filter_then_sort() {
    let options = FilterOptions {
        category: Some("ide-integration".to_string()),
        sort_by: Some(SortBy::Downloads),
        sort_order: Some(SortOrder::Desc),
    };
    assert_eq!(ids(&filter_and_sort(&mixed_catalog(), &options)), ["aider", "cline"]);
}
