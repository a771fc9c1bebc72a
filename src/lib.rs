// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Catalog search and ranking.
//!
//! Rank a catalog of records against a free-text query, propose completions
//! while the user types, narrow and re-sort results, and keep all of that off
//! the caller's thread.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   keystrokes   ┌──────────────────┐   Request (id)   ┌─────────────────┐
//! │  UI / CLI    │───────────────▶│ QueryCoordinator │─────────────────▶│    Executor     │
//! │              │◀───────────────│ (debounce, gate) │◀─────────────────│ remote | inline │
//! └──────────────┘  SearchState   └──────────────────┘   Reply (id)     └─────────────────┘
//!                                   │ SearchClient                        │ host::dispatch
//!                                   │ (latest id per kind)                ▼
//!                                   │                         ┌───────────────────────────┐
//!                                   │                         │ scoring · suggest · filter │
//!                                   ▼                         └───────────────────────────┘
//!                             stale replies dropped
//! ```
//!
//! The engine functions ([`score`], [`rank`], [`suggest`], [`filter_and_sort`])
//! are pure and infallible. Everything with a failure mode (config, catalog
//! files, the host channel) returns [`Result`].
//!
//! # Usage
//!
//! ```
//! use sift::{rank, suggest, Record};
//!
//! let mut cline = Record::new("cline", "cline/cline", "IDE coding agent", "ide-integration");
//! cline.stars = Some(48_900);
//! let catalog = vec![cline];
//!
//! assert_eq!(rank("cline", &catalog)[0].id, "cline");
//! assert_eq!(suggest("cl", &catalog, 8), vec!["cline"]);
//! ```

pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod runtime;
pub mod scoring;
pub mod search;
pub mod testing;
pub mod types;
pub mod utils;

pub use catalog::{load_catalog, parse_catalog};
pub use config::SearchConfig;
pub use coordinator::{ClientEvent, Debouncer, Key, QueryCoordinator, SearchClient, SuggestionGate};
pub use error::{Error, Result};
pub use runtime::{spawn_executor, Executor, ExecutorKind, ExecutorMode, InlineExecutor};
pub use scoring::{rank, rank_at, rank_scored, score, score_at};
pub use search::{filter_and_sort, sort_records, suggest, DEFAULT_MAX_SUGGESTIONS};
pub use types::{FilterOptions, Record, SearchState, SortBy, SortOrder, ALL_CATEGORIES};
