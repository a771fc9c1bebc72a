// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The non-ranking stages: autocomplete suggestions and filter/sort.
//!
//! Both are pure functions over a borrowed record slice. Like ranking, they
//! can run on whichever thread the execution host picks.

pub mod filter;
pub mod suggest;

pub use filter::{filter_and_sort, sort_records};
pub use suggest::{suggest, DEFAULT_MAX_SUGGESTIONS};
