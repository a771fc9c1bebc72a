//! Catalog in, ranked and filtered results out, through the public surface.

use std::time::{Duration, Instant};

use super::common::{fixed_now, mixed_catalog, sample_catalog, DEBOUNCE};
use sift::{
    filter_and_sort, parse_catalog, rank, score_at, FilterOptions, InlineExecutor, Key,
    QueryCoordinator, SearchConfig,
};

#[test]
fn test_cline_example() {
    let catalog = sample_catalog();
    let now = fixed_now();

    let ranked = rank("cline", &catalog);
    assert_eq!(ranked[0].name, "cline/cline");

    let first = score_at("cline", &catalog[0], now);
    let second = score_at("cline", &catalog[1], now);
    assert!(first > second, "cline/cline {} should beat claude-task-master {}", first, second);
}

#[test]
fn test_category_filter_example() {
    let catalog = sample_catalog();
    let filtered = filter_and_sort(&catalog, &FilterOptions::category("ide-integration"));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "cline/cline");
}

#[test]
fn test_rank_then_filter_matches_coordinator() {
    let catalog = mixed_catalog();
    let filters = FilterOptions::category("ide-integration");
    let expected = filter_and_sort(&rank("agent", &catalog), &filters);

    let mut coordinator = QueryCoordinator::with_executor(
        catalog,
        &SearchConfig::default(),
        Box::new(InlineExecutor::new()),
    );
    coordinator.set_filters(filters);
    let start = Instant::now();
    coordinator.input("agent", start);
    coordinator.tick(start + DEBOUNCE);
    coordinator.pump();

    assert_eq!(coordinator.results(), expected.as_slice());
    assert!(!coordinator.is_loading());
}

#[test]
fn test_catalog_file_shape_round_trip() {
    let text = r#"{
        "extensions": [
            {"id": "cline", "name": "cline/cline", "description": "IDE coding agent",
             "category": "ide-integration", "stars": 48900, "lastUpdated": "2025-05-30"},
            {"id": "tm", "name": "claude-task-master", "description": "task management",
             "category": "workflow", "tags": ["tasks"], "author": "eyaltoledano"}
        ]
    }"#;
    let catalog = parse_catalog(text).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[1].tags, ["tasks"]);
    assert_eq!(rank("cline", &catalog)[0].id, "cline");
}

#[test]
fn test_typing_then_enter_shows_ranked_results() {
    let mut coordinator = QueryCoordinator::with_executor(
        sample_catalog(),
        &SearchConfig::default(),
        Box::new(InlineExecutor::new()),
    );
    let start = Instant::now();
    coordinator.input("task", start);
    coordinator.tick(start + Duration::from_millis(20));
    coordinator.handle_key(Key::Enter);
    coordinator.pump();

    let state = coordinator.state();
    assert!(state.show_results);
    assert!(!state.show_suggestions);
    assert!(!state.is_searching);
    assert_eq!(coordinator.results()[0].id, "claude-task-master");
    assert_eq!(coordinator.searches_dispatched(), 1);
}
