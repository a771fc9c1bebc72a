// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the worker's message handler.
//!
//! Whatever arrives over the channel, the worker answers with one decodable
//! reply and never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sift::runtime::host::handle_message;
use sift::runtime::protocol::decode_reply;
use sift::runtime::Response;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let reply = decode_reply(&handle_message(&raw));
    assert!(!matches!(reply.response, Response::WorkerReady));
});
