// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The shapes everything else passes around.
//!
//! A [`Record`] is one catalog entry. The engine only ever reads records: it
//! ranks them, tokenizes them, filters and sorts copies of them, but never
//! mutates what the data layer handed in.
//!
//! # Invariants
//!
//! - **SearchState**: `selected_suggestion < suggestions.len()` whenever it is
//!   `Some`. Every transition that shrinks `suggestions` also resets the
//!   selection, so the index can never dangle.
//! - **FilterOptions**: a category of `"All"` means no filter, same as `None`.

use serde::{Deserialize, Serialize};

/// Category value that disables the category filter.
pub const ALL_CATEGORIES: &str = "All";

/// One catalog entry.
///
/// Field names serialize in camelCase (`lastUpdated`) so records read from
/// the catalog JSON and records sent across the host boundary share a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    /// ISO date or date-time. Kept as the raw string; parsed on demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Repository or homepage link. Carried through, never scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Record {
    /// Minimal record: everything optional left empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
            tags: Vec::new(),
            author: None,
            stars: None,
            downloads: None,
            last_updated: None,
            url: None,
        }
    }

    /// Author, or the empty string when absent.
    pub fn author_or_empty(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }
}

/// Field to sort by in the filter/sort stage.
///
/// Values that don't name a known field deserialize to `Unknown`, which
/// leaves the input order alone instead of failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Name,
    Stars,
    Downloads,
    LastUpdated,
    #[serde(other)]
    Unknown,
}

impl SortBy {
    /// Parse a user-supplied sort key. Never fails.
    pub fn parse(value: &str) -> Self {
        match value {
            "name" => SortBy::Name,
            "stars" => SortBy::Stars,
            "downloads" => SortBy::Downloads,
            "lastUpdated" | "last_updated" | "last-updated" => SortBy::LastUpdated,
            _ => SortBy::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Per-call filter and sort settings. Nothing here is persisted by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl FilterOptions {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn sorted(sort_by: SortBy, sort_order: SortOrder) -> Self {
        Self {
            category: None,
            sort_by: Some(sort_by),
            sort_order: Some(sort_order),
        }
    }

    /// The category to filter on, if any. `"All"` counts as none.
    pub fn active_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| *category != ALL_CATEGORIES)
    }

    /// True when applying these options cannot change a record list.
    pub fn is_noop(&self) -> bool {
        self.active_category().is_none()
            && matches!(self.sort_by, None | Some(SortBy::Unknown))
    }
}

/// Everything the search box needs to render, owned by the query coordinator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub suggestions: Vec<String>,
    /// Highlighted suggestion. `None` means nothing is highlighted.
    pub selected_suggestion: Option<usize>,
    pub is_searching: bool,
    pub show_suggestions: bool,
    pub show_results: bool,
}

impl SearchState {
    /// Selected index in the `-1 = none` convention used by UI layers.
    pub fn selected_suggestion_index(&self) -> isize {
        self.selected_suggestion.map_or(-1, |index| index as isize)
    }

    /// The highlighted suggestion text, if the selection is valid.
    pub fn active_suggestion(&self) -> Option<&str> {
        self.selected_suggestion
            .and_then(|index| self.suggestions.get(index))
            .map(String::as_str)
    }
}
