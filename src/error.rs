// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors at the edges of the engine.
//!
//! Scoring, ranking, suggestions and filtering never fail: bad input degrades
//! to "no match". What can fail is everything around them - loading a catalog,
//! reading config, talking to the worker thread. Those paths return [`Result`].

use thiserror::Error;

/// Result type alias using the crate error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog file could not be interpreted as a list of records.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// The off-thread host could not be started.
    #[error("Execution host unavailable: {0}")]
    HostUnavailable(String),

    /// The off-thread host went away while requests were outstanding.
    #[error("Execution host disconnected")]
    HostDisconnected,

    /// A message crossed the host boundary in a shape we don't understand.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A handler failed inside the host and reported it as an `ERROR` message.
    #[error("Host error: {0}")]
    Host(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}
