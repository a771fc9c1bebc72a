// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The engine surface a UI talks to: `search`, `get_suggestions`,
//! `filter_and_sort`, and a view of `{results, suggestions, is_loading, error}`.
//!
//! Every request gets the next id from one counter. Per request kind the
//! client remembers only the latest id it issued; a reply is applied only if
//! it answers that id. Anything older is stale and dropped, which is how
//! "cancellation" works when the host itself can't be interrupted.
//!
//! If the host goes away (channel closed, submit refused), the client swaps in
//! an inline host and resubmits whatever was still current. Errors reported
//! by the host land in `error` without touching the last good results.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Error;
use crate::runtime::{fallback_executor, Executor, ExecutorKind, Reply, Request, RequestKind, Response};
use crate::types::{FilterOptions, Record};

/// What changed after applying host replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// `results` now holds the answer to the latest request of this kind.
    ResultsUpdated(RequestKind),
    SuggestionsUpdated,
    /// The latest request of this kind failed; prior results are kept.
    Failed { kind: RequestKind, message: String },
    HostReady,
}

/// Latest issued id per request kind. `Some` means still outstanding.
#[derive(Debug, Default)]
struct Latest {
    search: Option<u64>,
    suggestions: Option<u64>,
    filter: Option<u64>,
}

impl Latest {
    fn slot(&mut self, kind: RequestKind) -> &mut Option<u64> {
        match kind {
            RequestKind::Search => &mut self.search,
            RequestKind::Suggestions => &mut self.suggestions,
            RequestKind::FilterSort => &mut self.filter,
        }
    }

    fn get(&self, kind: RequestKind) -> Option<u64> {
        match kind {
            RequestKind::Search => self.search,
            RequestKind::Suggestions => self.suggestions,
            RequestKind::FilterSort => self.filter,
        }
    }
}

pub struct SearchClient {
    executor: Box<dyn Executor>,
    items: Arc<[Record]>,
    results: Vec<Record>,
    suggestions: Vec<String>,
    error: Option<String>,
    host_ready: bool,
    next_id: u64,
    latest: Latest,
    in_flight: HashMap<u64, Request>,
    events: Vec<ClientEvent>,
    max_suggestions: usize,
}

impl SearchClient {
    /// Results start out as the whole catalog.
    pub fn new(items: Arc<[Record]>, executor: Box<dyn Executor>, max_suggestions: usize) -> Self {
        Self {
            executor,
            results: items.to_vec(),
            items,
            suggestions: Vec::new(),
            error: None,
            host_ready: false,
            next_id: 0,
            latest: Latest::default(),
            in_flight: HashMap::new(),
            events: Vec::new(),
            max_suggestions,
        }
    }

    // ------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------

    /// Rank the catalog for `query`. Returns the request id.
    pub fn search(&mut self, query: &str) -> u64 {
        self.search_filtered(query, FilterOptions::default())
    }

    /// Rank, then filter and sort the ranking, in one host round-trip.
    pub fn search_filtered(&mut self, query: &str, options: FilterOptions) -> u64 {
        let request = Request::Search {
            query: query.to_string(),
            items: Arc::clone(&self.items),
            options,
        };
        self.issue(request)
    }

    pub fn get_suggestions(&mut self, query: &str) -> u64 {
        let request = Request::Suggestions {
            query: query.to_string(),
            items: Arc::clone(&self.items),
            max_results: self.max_suggestions,
        };
        self.issue(request)
    }

    /// Filter and sort the whole catalog.
    pub fn filter_and_sort(&mut self, options: FilterOptions) -> u64 {
        let items = Arc::clone(&self.items);
        self.filter_and_sort_items(items, options)
    }

    /// Filter and sort an arbitrary record set, e.g. the latest ranking.
    pub fn filter_and_sort_items(&mut self, items: Arc<[Record]>, options: FilterOptions) -> u64 {
        self.issue(Request::FilterSort { items, options })
    }

    fn issue(&mut self, request: Request) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        let kind = request.kind();

        // Only the newest request per kind is worth remembering.
        self.in_flight.retain(|_, pending| pending.kind() != kind);
        *self.latest.slot(kind) = Some(id);
        self.in_flight.insert(id, request.clone());

        if let Err(e) = self.executor.submit(id, request) {
            self.fail_over(&e);
        }
        id
    }

    /// Forget the outstanding request of `kind`; its reply will be dropped.
    pub fn cancel(&mut self, kind: RequestKind) {
        if let Some(id) = self.latest.slot(kind).take() {
            debug!(id, ?kind, "cancelled");
        }
        self.in_flight.retain(|_, pending| pending.kind() != kind);
    }

    fn cancel_all(&mut self) {
        for kind in [RequestKind::Search, RequestKind::Suggestions, RequestKind::FilterSort] {
            self.cancel(kind);
        }
    }

    // ------------------------------------------------------------------
    // Replies
    // ------------------------------------------------------------------

    /// Apply every reply that has already arrived. Never blocks.
    pub fn pump(&mut self) -> Vec<ClientEvent> {
        loop {
            match self.executor.try_recv() {
                Ok(Some(reply)) => self.apply(reply),
                Ok(None) => break,
                Err(e) => self.fail_over(&e),
            }
        }
        std::mem::take(&mut self.events)
    }

    /// Wait up to `timeout` for one reply, then apply everything available.
    pub fn wait_next(&mut self, timeout: Duration) -> Vec<ClientEvent> {
        match self.executor.recv_timeout(timeout) {
            Ok(Some(reply)) => self.apply(reply),
            Ok(None) => {}
            Err(e) => self.fail_over(&e),
        }
        self.pump()
    }

    fn apply(&mut self, reply: Reply) {
        let Reply { id, response } = reply;
        if response == Response::WorkerReady {
            debug!("execution host ready");
            self.host_ready = true;
            self.events.push(ClientEvent::HostReady);
            return;
        }

        let Some(request) = self.in_flight.remove(&id) else {
            debug!(id, "dropping reply for superseded request");
            return;
        };
        let kind = request.kind();
        if self.latest.get(kind) != Some(id) {
            debug!(id, ?kind, "dropping stale reply");
            return;
        }
        *self.latest.slot(kind) = None;

        match (kind, response) {
            (RequestKind::Search, Response::SearchResults(results))
            | (RequestKind::FilterSort, Response::FilterSortResults(results)) => {
                self.results = results;
                self.error = None;
                self.events.push(ClientEvent::ResultsUpdated(kind));
            }
            (RequestKind::Suggestions, Response::SuggestionsResults(suggestions)) => {
                self.suggestions = suggestions;
                self.events.push(ClientEvent::SuggestionsUpdated);
            }
            (_, Response::Error(message)) => self.record_failure(kind, message),
            (_, other) => {
                let message = format!("unexpected {} reply to {:?} request", other.message_type(), kind);
                self.record_failure(kind, message);
            }
        }
    }

    fn record_failure(&mut self, kind: RequestKind, message: String) {
        warn!(?kind, %message, "search request failed");
        self.error = Some(message.clone());
        self.events.push(ClientEvent::Failed { kind, message });
    }

    /// Replace a dead host with an inline one and resubmit current requests.
    fn fail_over(&mut self, cause: &Error) {
        warn!(error = %cause, from = ?self.executor.kind(), "execution host failed, falling back to inline");
        self.executor = fallback_executor();

        let mut current: Vec<(u64, Request)> = self
            .in_flight
            .iter()
            .filter(|(id, request)| self.latest.get(request.kind()) == Some(**id))
            .map(|(id, request)| (*id, request.clone()))
            .collect();
        current.sort_by_key(|(id, _)| *id);
        self.in_flight.retain(|id, request| self.latest.get(request.kind()) == Some(*id));

        for (id, request) in current {
            let kind = request.kind();
            if let Err(e) = self.executor.submit(id, request) {
                self.in_flight.remove(&id);
                *self.latest.slot(kind) = None;
                self.record_failure(kind, e.to_string());
            }
        }
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// Show `results` directly, dropping any outstanding search or filter.
    pub fn set_results(&mut self, results: Vec<Record>) {
        self.cancel(RequestKind::Search);
        self.cancel(RequestKind::FilterSort);
        self.results = results;
    }

    pub fn clear_suggestions(&mut self) {
        self.cancel(RequestKind::Suggestions);
        self.suggestions.clear();
    }

    /// Back to the initial view: whole catalog, no suggestions, no error.
    pub fn reset(&mut self) {
        self.cancel_all();
        self.results = self.items.to_vec();
        self.suggestions.clear();
        self.error = None;
    }

    /// Swap in a new catalog from the data layer and reset.
    pub fn replace_items(&mut self, items: Arc<[Record]>) {
        self.items = items;
        self.reset();
    }

    pub fn items(&self) -> &Arc<[Record]> {
        &self.items
    }

    pub fn results(&self) -> &[Record] {
        &self.results
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A search or filter request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.latest.search.is_some() || self.latest.filter.is_some()
    }

    /// Any request at all is outstanding.
    pub fn is_busy(&self) -> bool {
        self.is_loading() || self.latest.suggestions.is_some()
    }

    pub fn host_ready(&self) -> bool {
        self.host_ready
    }

    pub fn executor_kind(&self) -> ExecutorKind {
        self.executor.kind()
    }
}
