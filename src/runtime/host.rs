// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The request handler every execution host shares.
//!
//! Inline and remote hosts differ only in which thread calls [`dispatch`].
//! Keeping one handler is what makes the two paths give identical answers.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use super::protocol::{decode_reply, encode_reply, Envelope, Reply, Request, Response};
use crate::scoring::rank;
use crate::search::{filter_and_sort, suggest};

/// Run one request through the pure stages.
///
/// A panicking handler is caught here and reported as `ERROR`; the host
/// never goes down with it.
pub fn dispatch(id: u64, request: Request) -> Reply {
    let kind = request.message_type();
    match panic::catch_unwind(AssertUnwindSafe(|| handle(request))) {
        Ok(response) => Reply::new(id, response),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(id, %kind, %message, "request handler panicked");
            Reply::error(id, message)
        }
    }
}

fn handle(request: Request) -> Response {
    match request {
        Request::Search {
            query,
            items,
            options,
        } => {
            let ranked = rank(&query, &items);
            if options.is_noop() {
                Response::SearchResults(ranked)
            } else {
                Response::SearchResults(filter_and_sort(&ranked, &options))
            }
        }
        Request::Suggestions {
            query,
            items,
            max_results,
        } => Response::SuggestionsResults(suggest(&query, &items, max_results)),
        Request::FilterSort { items, options } => {
            Response::FilterSortResults(filter_and_sort(&items, &options))
        }
    }
}

/// Handle one raw JSON message and produce the raw JSON reply.
///
/// Malformed JSON, unknown `type` values and bad payloads all come back as
/// `ERROR` envelopes rather than being dropped.
pub fn handle_message(raw: &str) -> String {
    let envelope: Envelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(e) => return encode_reply(&Reply::error(0, format!("Malformed message: {}", e))),
    };
    let reply = match Request::from_envelope(envelope) {
        Ok((id, request)) => {
            debug!(id, kind = %request.message_type(), "handling request");
            dispatch(id, request)
        }
        Err(e) => {
            debug!(error = %e, "rejecting message");
            let id = serde_json::from_str::<Envelope>(raw).map_or(0, |env| env.id);
            Reply::error(id, e.to_string())
        }
    };
    encode_reply(&reply)
}

/// [`handle_message`] for callers holding typed values, e.g. tests.
pub fn handle_envelope(envelope: &Envelope) -> Reply {
    match serde_json::to_string(envelope) {
        Ok(raw) => decode_reply(&handle_message(&raw)),
        Err(e) => Reply::error(envelope.id, e.to_string()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "request handler panicked".to_string()
    }
}
