//! Debouncing, stale replies and host failures, driven by a scripted host.

use std::time::{Duration, Instant};

use super::common::{make_record, sample_catalog, scripted_coordinator, type_queries, DEBOUNCE};
use sift::runtime::RequestKind;
use sift::{ExecutorKind, FilterOptions};

#[test]
fn test_debounce_collapses_rapid_typing() {
    let (mut coordinator, handle) = scripted_coordinator(sample_catalog());
    let start = Instant::now();
    let last = type_queries(
        &mut coordinator,
        &["t", "te", "tes", "test"],
        start,
        Duration::from_millis(50),
    );

    coordinator.tick(last + DEBOUNCE - Duration::from_millis(1));
    assert_eq!(handle.submitted_count(RequestKind::Search), 0);

    coordinator.tick(last + DEBOUNCE);
    assert_eq!(handle.submitted_queries(RequestKind::Search), ["test"]);
    assert_eq!(coordinator.searches_dispatched(), 1);
}

#[test]
fn test_suggestions_are_not_debounced() {
    let (mut coordinator, handle) = scripted_coordinator(sample_catalog());
    type_queries(&mut coordinator, &["cl", "cla"], Instant::now(), Duration::from_millis(10));
    assert_eq!(handle.submitted_queries(RequestKind::Suggestions), ["cl", "cla"]);
}

#[test]
fn test_stale_search_reply_is_rejected() {
    let (mut coordinator, handle) = scripted_coordinator(sample_catalog());
    let start = Instant::now();

    // Two searches go out, "cline" first, then "task".
    coordinator.input("cline", start);
    coordinator.tick(start + DEBOUNCE);
    let later = start + DEBOUNCE + Duration::from_millis(10);
    coordinator.input("task", later);
    coordinator.tick(later + DEBOUNCE);

    assert_eq!(handle.submitted_queries(RequestKind::Search), ["cline", "task"]);

    // The newer reply lands first, the older one after it.
    let ids = handle.submitted_ids();
    let task_id = *ids.last().unwrap();
    handle.answer(task_id);
    coordinator.pump();
    assert_eq!(coordinator.results()[0].id, "claude-task-master");

    handle.answer_all();
    coordinator.pump();
    assert_eq!(coordinator.results()[0].id, "claude-task-master");
    assert!(!coordinator.is_loading());
}

#[test]
fn test_search_reply_for_edited_query_is_dropped() {
    let catalog = vec![make_record("b", "bbb", "", "misc"), make_record("a", "aaa", "", "misc")];
    let (mut coordinator, handle) = scripted_coordinator(catalog);
    let start = Instant::now();

    coordinator.input("a", start);
    coordinator.tick(start + DEBOUNCE);
    let stale = *handle.submitted_ids().last().unwrap();
    let before = coordinator.results().to_vec();

    // The query moves on before its own rank is due; the old reply lands.
    let edited = start + DEBOUNCE + Duration::from_millis(10);
    coordinator.input("aa", edited);
    assert!(handle.answer(stale));
    coordinator.pump();

    assert_eq!(coordinator.results(), before.as_slice());
    assert!(coordinator.state().is_searching);
    assert!(coordinator.is_loading());

    coordinator.tick(edited + DEBOUNCE);
    assert_eq!(handle.submitted_queries(RequestKind::Search), ["a", "aa"]);
    handle.answer_all();
    coordinator.pump();

    let ids: Vec<&str> = coordinator.results().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a"]);
    assert!(!coordinator.state().is_searching);
    assert!(!coordinator.is_loading());
}

#[test]
fn test_host_error_keeps_previous_results() {
    let (mut coordinator, handle) = scripted_coordinator(sample_catalog());
    let start = Instant::now();

    coordinator.input("cline", start);
    coordinator.tick(start + DEBOUNCE);
    handle.answer_all();
    coordinator.pump();
    let before = coordinator.results().to_vec();
    assert_eq!(before[0].id, "cline");

    let later = start + DEBOUNCE * 2;
    coordinator.input("task", later);
    coordinator.tick(later + DEBOUNCE);
    let failing = *handle.submitted_ids().last().unwrap();
    handle.fail(failing, "ranking exploded");
    coordinator.pump();

    assert_eq!(coordinator.error(), Some("ranking exploded"));
    assert_eq!(coordinator.results(), before.as_slice());
    assert!(!coordinator.state().is_searching);
}

#[test]
fn test_dead_host_falls_back_inline() {
    let (mut coordinator, handle) = scripted_coordinator(sample_catalog());
    assert_eq!(coordinator.executor_kind(), ExecutorKind::Remote);

    let start = Instant::now();
    coordinator.input("task", start);
    handle.disconnect();
    coordinator.tick(start + DEBOUNCE);
    coordinator.pump();

    assert_eq!(coordinator.executor_kind(), ExecutorKind::Inline);
    assert_eq!(coordinator.results()[0].id, "claude-task-master");
    assert!(coordinator.error().is_none());
}

#[test]
fn test_filters_follow_late_rankings() {
    let (mut coordinator, handle) = scripted_coordinator(sample_catalog());
    coordinator.set_filters(FilterOptions::category("workflow"));
    handle.answer_all();
    coordinator.pump();
    assert_eq!(coordinator.results().len(), 1);

    let start = Instant::now();
    coordinator.input("cl", start);
    coordinator.tick(start + DEBOUNCE);
    handle.answer_all();
    coordinator.pump();

    // One reply carries the filtered ranking; nothing else is outstanding.
    assert_eq!(handle.submitted_count(RequestKind::FilterSort), 1);
    assert_eq!(coordinator.results().len(), 1);
    assert_eq!(coordinator.results()[0].id, "claude-task-master");
    assert!(!coordinator.state().is_searching);
    assert!(!coordinator.is_loading());
}

#[test]
fn test_clearing_query_drops_outstanding_search() {
    let (mut coordinator, handle) = scripted_coordinator(sample_catalog());
    let start = Instant::now();
    coordinator.input("task", start);
    coordinator.tick(start + DEBOUNCE);
    coordinator.input("", start + DEBOUNCE);

    handle.answer_all();
    coordinator.pump();
    assert_eq!(coordinator.results().len(), 2);
    assert_eq!(coordinator.results()[0].id, "cline");
}
