// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Synchronous host: runs each request on the caller's thread at submit time.
//!
//! This is the fallback when no worker thread can be had. Replies are queued
//! and handed out by `try_recv`, so callers see the same asynchronous shape
//! they'd see from the remote host.

use std::collections::VecDeque;
use std::time::Duration;

use super::host::dispatch;
use super::protocol::{Reply, Request};
use super::{Executor, ExecutorKind};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct InlineExecutor {
    replies: VecDeque<Reply>,
}

impl InlineExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Executor for InlineExecutor {
    fn kind(&self) -> ExecutorKind {
        ExecutorKind::Inline
    }

    fn submit(&mut self, id: u64, request: Request) -> Result<()> {
        self.replies.push_back(dispatch(id, request));
        Ok(())
    }

    fn try_recv(&mut self) -> Result<Option<Reply>> {
        Ok(self.replies.pop_front())
    }

    fn recv_timeout(&mut self, _timeout: Duration) -> Result<Option<Reply>> {
        // Everything submitted is already answered; waiting can't add more.
        Ok(self.replies.pop_front())
    }
}
