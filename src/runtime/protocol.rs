// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The message contract between the coordinator and an execution host.
//!
//! Every message is a JSON envelope:
//!
//! ```text
//! { "type": "SEARCH", "id": 7, "payload": { "query": "...", "items": [...] } }
//! ```
//!
//! | Request       | Payload                         | Response              |
//! |---------------|---------------------------------|-----------------------|
//! | `SEARCH`      | `query`, `items`, `options`?    | `SEARCH_RESULTS`      |
//! | `SUGGESTIONS` | `query`, `items`, `maxResults`? | `SUGGESTIONS_RESULTS` |
//! | `FILTER_SORT` | `items`, `options`              | `FILTER_SORT_RESULTS` |
//!
//! `options` on `SEARCH` filters and sorts the ranking before it is sent
//! back, so a filtered view never needs a second round-trip.
//!
//! Anything that fails becomes `ERROR { message }`. The host also sends one
//! unsolicited `WORKER_READY` (id 0) when it comes up.
//!
//! `id` is the request sequence number. Responses echo it, which is how the
//! coordinator tells a fresh answer from a stale one.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::search::DEFAULT_MAX_SUGGESTIONS;
use crate::types::{FilterOptions, Record};

/// Every `type` discriminator the protocol knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Search,
    Suggestions,
    FilterSort,
    SearchResults,
    SuggestionsResults,
    FilterSortResults,
    Error,
    WorkerReady,
}

impl MessageType {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Search => "SEARCH",
            MessageType::Suggestions => "SUGGESTIONS",
            MessageType::FilterSort => "FILTER_SORT",
            MessageType::SearchResults => "SEARCH_RESULTS",
            MessageType::SuggestionsResults => "SUGGESTIONS_RESULTS",
            MessageType::FilterSortResults => "FILTER_SORT_RESULTS",
            MessageType::Error => "ERROR",
            MessageType::WorkerReady => "WORKER_READY",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "SEARCH" => MessageType::Search,
            "SUGGESTIONS" => MessageType::Suggestions,
            "FILTER_SORT" => MessageType::FilterSort,
            "SEARCH_RESULTS" => MessageType::SearchResults,
            "SUGGESTIONS_RESULTS" => MessageType::SuggestionsResults,
            "FILTER_SORT_RESULTS" => MessageType::FilterSortResults,
            "ERROR" => MessageType::Error,
            "WORKER_READY" => MessageType::WorkerReady,
            _ => return None,
        })
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw wire envelope. `type` stays a string so unknown values can be reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryPayload {
    query: String,
    items: Arc<[Record]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_results: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<FilterOptions>,
}

#[derive(Serialize, Deserialize)]
struct FilterSortPayload {
    items: Arc<[Record]>,
    #[serde(default)]
    options: FilterOptions,
}

#[derive(Serialize, Deserialize)]
struct ResultsPayload {
    results: Vec<Record>,
}

#[derive(Serialize, Deserialize)]
struct SuggestionsPayload {
    suggestions: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct ErrorPayload {
    message: String,
}

/// The three kinds of work a host can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Search,
    Suggestions,
    FilterSort,
}

/// A unit of work for the host. Items are shared, never copied in-process.
#[derive(Debug, Clone)]
pub enum Request {
    /// Rank, then apply `options` unless they are a no-op.
    Search {
        query: String,
        items: Arc<[Record]>,
        options: FilterOptions,
    },
    Suggestions {
        query: String,
        items: Arc<[Record]>,
        max_results: usize,
    },
    FilterSort {
        items: Arc<[Record]>,
        options: FilterOptions,
    },
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::Search { .. } => RequestKind::Search,
            Request::Suggestions { .. } => RequestKind::Suggestions,
            Request::FilterSort { .. } => RequestKind::FilterSort,
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Request::Search { .. } => MessageType::Search,
            Request::Suggestions { .. } => MessageType::Suggestions,
            Request::FilterSort { .. } => MessageType::FilterSort,
        }
    }

    pub fn to_envelope(&self, id: u64) -> Result<Envelope> {
        let payload = match self {
            Request::Search {
                query,
                items,
                options,
            } => serde_json::to_value(QueryPayload {
                query: query.clone(),
                items: Arc::clone(items),
                max_results: None,
                options: (!options.is_noop()).then(|| options.clone()),
            })?,
            Request::Suggestions {
                query,
                items,
                max_results,
            } => serde_json::to_value(QueryPayload {
                query: query.clone(),
                items: Arc::clone(items),
                max_results: Some(*max_results),
                options: None,
            })?,
            Request::FilterSort { items, options } => serde_json::to_value(FilterSortPayload {
                items: Arc::clone(items),
                options: options.clone(),
            })?,
        };
        Ok(Envelope {
            kind: self.message_type().as_str().to_string(),
            id,
            payload,
        })
    }

    /// Decode a request envelope. Unknown or response-only types are errors.
    pub fn from_envelope(envelope: Envelope) -> Result<(u64, Request)> {
        let id = envelope.id;
        let request = match MessageType::parse(&envelope.kind) {
            Some(MessageType::Search) => {
                let payload: QueryPayload = decode_payload(envelope)?;
                Request::Search {
                    query: payload.query,
                    items: payload.items,
                    options: payload.options.unwrap_or_default(),
                }
            }
            Some(MessageType::Suggestions) => {
                let payload: QueryPayload = decode_payload(envelope)?;
                Request::Suggestions {
                    query: payload.query,
                    items: payload.items,
                    max_results: payload.max_results.unwrap_or(DEFAULT_MAX_SUGGESTIONS),
                }
            }
            Some(MessageType::FilterSort) => {
                let payload: FilterSortPayload = decode_payload(envelope)?;
                Request::FilterSort {
                    items: payload.items,
                    options: payload.options,
                }
            }
            _ => {
                return Err(Error::protocol(format!(
                    "Unknown message type: {}",
                    envelope.kind
                )))
            }
        };
        Ok((id, request))
    }
}

fn decode_payload<T: serde::de::DeserializeOwned>(envelope: Envelope) -> Result<T> {
    let kind = envelope.kind;
    serde_json::from_value(envelope.payload)
        .map_err(|e| Error::protocol(format!("Invalid {} payload: {}", kind, e)))
}

/// What a host sends back.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    SearchResults(Vec<Record>),
    SuggestionsResults(Vec<String>),
    FilterSortResults(Vec<Record>),
    Error(String),
    WorkerReady,
}

impl Response {
    pub fn message_type(&self) -> MessageType {
        match self {
            Response::SearchResults(_) => MessageType::SearchResults,
            Response::SuggestionsResults(_) => MessageType::SuggestionsResults,
            Response::FilterSortResults(_) => MessageType::FilterSortResults,
            Response::Error(_) => MessageType::Error,
            Response::WorkerReady => MessageType::WorkerReady,
        }
    }
}

/// A response tagged with the id of the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub id: u64,
    pub response: Response,
}

impl Reply {
    pub fn new(id: u64, response: Response) -> Self {
        Self { id, response }
    }

    pub fn error(id: u64, message: impl Into<String>) -> Self {
        Self::new(id, Response::Error(message.into()))
    }

    pub fn ready() -> Self {
        Self::new(0, Response::WorkerReady)
    }

    pub fn to_envelope(&self) -> Result<Envelope> {
        let payload = match &self.response {
            Response::SearchResults(results) | Response::FilterSortResults(results) => {
                json!({ "results": results })
            }
            Response::SuggestionsResults(suggestions) => json!({ "suggestions": suggestions }),
            Response::Error(message) => serde_json::to_value(ErrorPayload {
                message: message.clone(),
            })?,
            Response::WorkerReady => json!({}),
        };
        Ok(Envelope {
            kind: self.response.message_type().as_str().to_string(),
            id: self.id,
            payload,
        })
    }

    pub fn from_envelope(envelope: Envelope) -> Result<Reply> {
        let id = envelope.id;
        let response = match MessageType::parse(&envelope.kind) {
            Some(MessageType::SearchResults) => {
                Response::SearchResults(decode_payload::<ResultsPayload>(envelope)?.results)
            }
            Some(MessageType::FilterSortResults) => {
                Response::FilterSortResults(decode_payload::<ResultsPayload>(envelope)?.results)
            }
            Some(MessageType::SuggestionsResults) => Response::SuggestionsResults(
                decode_payload::<SuggestionsPayload>(envelope)?.suggestions,
            ),
            Some(MessageType::Error) => {
                Response::Error(decode_payload::<ErrorPayload>(envelope)?.message)
            }
            Some(MessageType::WorkerReady) => Response::WorkerReady,
            _ => {
                return Err(Error::protocol(format!(
                    "Unknown message type: {}",
                    envelope.kind
                )))
            }
        };
        Ok(Reply { id, response })
    }
}

/// Serialize a reply for the wire. Falls back to a bare `ERROR` envelope if
/// the reply itself can't be encoded.
pub fn encode_reply(reply: &Reply) -> String {
    match reply.to_envelope().and_then(|env| Ok(serde_json::to_string(&env)?)) {
        Ok(text) => text,
        Err(e) => json!({
            "type": MessageType::Error.as_str(),
            "id": reply.id,
            "payload": { "message": format!("Failed to encode reply: {}", e) },
        })
        .to_string(),
    }
}

/// Parse a reply from the wire. Undecodable text becomes an `ERROR` reply.
pub fn decode_reply(text: &str) -> Reply {
    serde_json::from_str::<Envelope>(text)
        .map_err(Error::from)
        .and_then(Reply::from_envelope)
        .unwrap_or_else(|e| Reply::error(0, e.to_string()))
}
