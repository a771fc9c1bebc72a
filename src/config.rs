// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tunables for the query pipeline.
//!
//! Every field has a default, so `{}` is a valid config file and callers only
//! spell out what they change:
//!
//! ```json
//! { "debounceMs": 150, "maxSuggestions": 5, "executor": "inline" }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::runtime::ExecutorMode;
use crate::search::DEFAULT_MAX_SUGGESTIONS;
use crate::utils::MAX_QUERY_LEN;

/// Delay between the last keystroke and the ranking request.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Upper bound on `debounce_ms`. Anything longer reads as a hang.
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub max_suggestions: usize,
    /// Queries are cut to this many characters before they're dispatched.
    pub max_query_len: usize,
    pub executor: ExecutorMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            max_query_len: MAX_QUERY_LEN,
            executor: ExecutorMode::Auto,
        }
    }
}

impl SearchConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(text)
            .map_err(|e| Error::config(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(Error::config(format!(
                "debounceMs must be at most {} (got {})",
                MAX_DEBOUNCE_MS, self.debounce_ms
            )));
        }
        if self.max_suggestions == 0 {
            return Err(Error::config("maxSuggestions must be at least 1"));
        }
        if self.max_query_len == 0 {
            return Err(Error::config("maxQueryLen must be at least 1"));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
