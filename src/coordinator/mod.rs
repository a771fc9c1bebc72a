// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search box state machine.
//!
//! [`QueryCoordinator`] turns input events (keystrokes, arrow keys, Enter,
//! Escape, suggestion clicks, resets) into requests on a [`SearchClient`] and
//! turns the client's replies back into [`SearchState`]. It is the only
//! writer of that state, and it only writes from the caller's thread.
//!
//! | Event                       | Effect                                                      |
//! |-----------------------------|-------------------------------------------------------------|
//! | input, non-empty            | drop outstanding rank; debounce a new one; request suggestions |
//! | input, empty                | state back to defaults; full result set                     |
//! | rank reply (latest only)    | new results, already filtered; not searching                |
//! | filters changed             | re-rank the current query, or filter the catalog if blank   |
//! | suggestion selected         | query = suggestion; list cleared; gate suppressed; rank now |
//! | Enter, suggestion active    | select it, then show results                                |
//! | Enter, none active          | show results (flushing any pending rank)                    |
//! | ArrowDown / ArrowUp         | move selection, clamped to `[-1, len - 1]`                   |
//! | Escape                      | hide suggestions, clear selection                           |
//! | reset                       | defaults; full result set                                   |
//!
//! Suggestion suppression is the [`SuggestionGate`]. Selecting a suggestion or
//! pressing Enter closes it; only a genuine query edit opens it again, so a
//! late suggestion reply can't pop the dropdown back up.
//!
//! Active filters travel with every rank request, so the host returns the
//! filtered ranking in one reply and no unfiltered ranking is ever shown.

mod client;
mod debounce;

pub use client::{ClientEvent, SearchClient};
pub use debounce::Debouncer;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::runtime::{spawn_executor, Executor, ExecutorKind, RequestKind};
use crate::types::{FilterOptions, Record, SearchState};
use crate::utils::cap_query;

/// Keys the search box reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    ArrowUp,
    ArrowDown,
    Escape,
}

/// Whether suggestion replies may open the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestionGate {
    #[default]
    Open,
    /// Closed by a selection or submit; reopened by the next query edit.
    Suppressed,
}

pub struct QueryCoordinator {
    client: SearchClient,
    records: Arc<[Record]>,
    filters: FilterOptions,
    state: SearchState,
    gate: SuggestionGate,
    debouncer: Debouncer<String>,
    max_query_len: usize,
    searches_dispatched: u64,
}

impl QueryCoordinator {
    /// Build a coordinator with the host selected by `config.executor`.
    pub fn new(records: Vec<Record>, config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let executor = spawn_executor(config.executor)?;
        Ok(Self::with_executor(records, config, executor))
    }

    /// Build a coordinator around an existing host.
    pub fn with_executor(records: Vec<Record>, config: &SearchConfig, executor: Box<dyn Executor>) -> Self {
        let records: Arc<[Record]> = records.into();
        Self {
            client: SearchClient::new(Arc::clone(&records), executor, config.max_suggestions),
            records,
            filters: FilterOptions::default(),
            state: SearchState::default(),
            gate: SuggestionGate::Open,
            debouncer: Debouncer::new(config.debounce()),
            max_query_len: config.max_query_len,
            searches_dispatched: 0,
        }
    }

    // ------------------------------------------------------------------
    // Input events
    // ------------------------------------------------------------------

    /// The query text changed at `now`.
    pub fn input(&mut self, query: &str, now: Instant) {
        let query = cap_query(query, self.max_query_len);
        if query == self.state.query {
            return;
        }
        self.state.query = query.to_string();
        self.state.selected_suggestion = None;
        self.gate = SuggestionGate::Open;

        if query.trim().is_empty() {
            self.clear_query();
            return;
        }

        // Whatever is in flight answers an older query now.
        self.client.cancel(RequestKind::Search);
        self.client.cancel(RequestKind::FilterSort);
        self.state.is_searching = true;
        self.debouncer.schedule(query.to_string(), now);
        self.client.get_suggestions(query);
    }

    fn clear_query(&mut self) {
        self.debouncer.cancel();
        self.client.cancel(RequestKind::Search);
        self.client.clear_suggestions();
        let query = std::mem::take(&mut self.state.query);
        self.state = SearchState {
            query,
            ..SearchState::default()
        };
        self.show_catalog();
    }

    /// Pick suggestion `index` as the new query and rank it right away.
    ///
    /// Returns false if there is no such suggestion.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let Some(text) = self.state.suggestions.get(index).cloned() else {
            return false;
        };
        debug!(suggestion = %text, "suggestion selected");

        self.state.query = text.clone();
        self.state.suggestions.clear();
        self.state.selected_suggestion = None;
        self.state.show_suggestions = false;
        self.gate = SuggestionGate::Suppressed;
        self.client.clear_suggestions();

        self.debouncer.cancel();
        self.dispatch_search(&text);
        true
    }

    fn dispatch_search(&mut self, query: &str) {
        self.state.is_searching = true;
        self.searches_dispatched += 1;
        self.client.search_filtered(query, self.filters.clone());
    }

    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Enter => self.submit(),
            Key::ArrowDown => {
                let last = self.state.suggestions.len().checked_sub(1);
                self.state.selected_suggestion = match (self.state.selected_suggestion, last) {
                    (_, None) => None,
                    (None, Some(_)) => Some(0),
                    (Some(index), Some(last)) => Some((index + 1).min(last)),
                };
            }
            Key::ArrowUp => {
                self.state.selected_suggestion = match self.state.selected_suggestion {
                    None | Some(0) => None,
                    Some(index) => Some(index - 1),
                };
            }
            Key::Escape => {
                self.state.show_suggestions = false;
                self.state.selected_suggestion = None;
            }
        }
    }

    fn submit(&mut self) {
        let active = self
            .state
            .selected_suggestion
            .filter(|&index| index < self.state.suggestions.len());
        match active {
            Some(index) => {
                self.select_suggestion(index);
            }
            None => {
                let client = &mut self.client;
                let filters = &self.filters;
                if self.debouncer.flush(|query| {
                    client.search_filtered(&query, filters.clone());
                }) {
                    self.searches_dispatched += 1;
                }
                self.gate = SuggestionGate::Suppressed;
                self.client.clear_suggestions();
            }
        }
        self.state.show_results = true;
        self.state.show_suggestions = false;
    }

    /// Apply category/sort options to the current results, and to every
    /// ranking after this.
    ///
    /// With a query, the current query is ranked again under the new options
    /// and the previous results stay up until that reply lands. A pending
    /// debounced rank picks the options up when it fires.
    pub fn set_filters(&mut self, options: FilterOptions) {
        self.filters = options;
        if self.state.query.trim().is_empty() {
            self.show_catalog();
        } else if !self.debouncer.is_pending() {
            let query = self.state.query.clone();
            self.dispatch_search(&query);
        }
    }

    fn show_catalog(&mut self) {
        if self.filters.is_noop() {
            self.client.set_results(self.records.to_vec());
        } else {
            self.client
                .filter_and_sort_items(Arc::clone(&self.records), self.filters.clone());
        }
    }

    /// Back to defaults: empty query, no filters, the whole catalog.
    pub fn reset(&mut self) {
        self.debouncer.cancel();
        self.client.reset();
        self.state = SearchState::default();
        self.gate = SuggestionGate::Open;
        self.filters = FilterOptions::default();
    }

    /// Take a new catalog from the data layer. Resets everything.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.records = records.into();
        self.client.replace_items(Arc::clone(&self.records));
        self.reset();
    }

    // ------------------------------------------------------------------
    // Time and replies
    // ------------------------------------------------------------------

    /// Fire the debounced rank if due, then apply whatever replies arrived.
    pub fn tick(&mut self, now: Instant) {
        let client = &mut self.client;
        let filters = &self.filters;
        if self.debouncer.fire(now, |query| {
            debug!(%query, "dispatching debounced search");
            client.search_filtered(&query, filters.clone());
        }) {
            self.searches_dispatched += 1;
        }
        self.pump();
    }

    /// Apply replies that have already arrived. Never blocks.
    pub fn pump(&mut self) {
        for event in self.client.pump() {
            self.on_event(event);
        }
    }

    /// Drive timers and replies with the real clock until idle or `timeout`.
    ///
    /// Returns `true` if everything settled.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let now = Instant::now();
            self.tick(now);
            if !self.debouncer.is_pending() && !self.client.is_busy() {
                return true;
            }
            if now >= deadline {
                return false;
            }
            let budget = deadline - now;
            match self.debouncer.deadline() {
                Some(due) if due > now => thread::sleep((due - now).min(budget)),
                _ => {
                    for event in self.client.wait_next(budget.min(Duration::from_millis(50))) {
                        self.on_event(event);
                    }
                }
            }
        }
    }

    fn on_event(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::ResultsUpdated(RequestKind::Search) => {
                self.state.is_searching = false;
            }
            ClientEvent::ResultsUpdated(_) => {}
            ClientEvent::SuggestionsUpdated => {
                if self.gate == SuggestionGate::Suppressed {
                    return;
                }
                self.state.suggestions = self.client.suggestions().to_vec();
                self.state.selected_suggestion = None;
                self.state.show_suggestions = !self.state.suggestions.is_empty();
            }
            ClientEvent::Failed { kind, .. } => {
                if kind == RequestKind::Search {
                    self.state.is_searching = false;
                }
            }
            ClientEvent::HostReady => {}
        }
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn results(&self) -> &[Record] {
        self.client.results()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_searching || self.client.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.client.error()
    }

    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    pub fn suggestion_gate(&self) -> SuggestionGate {
        self.gate
    }

    /// When the pending debounced search is due, if there is one.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn executor_kind(&self) -> ExecutorKind {
        self.client.executor_kind()
    }

    /// Rank requests sent to the host so far (debounced, flushed or selected).
    pub fn searches_dispatched(&self) -> u64 {
        self.searches_dispatched
    }

    pub fn host_ready(&self) -> bool {
        self.client.host_ready()
    }
}
