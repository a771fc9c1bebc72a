// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::runtime::host::dispatch;
use crate::runtime::{Executor, ExecutorKind, Reply, Request, RequestKind};
use crate::types::Record;

/// Create a record with the four always-present text fields.
pub fn make_record(id: &str, name: &str, description: &str, category: &str) -> Record {
    Record::new(id, name, description, category)
}

/// A fixed "now" for recency scoring: 2025-06-01T00:00:00Z.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0)
        .single()
        .expect("fixed test date is valid")
}

/// The two-record catalog used in the end-to-end ranking example.
pub fn sample_catalog() -> Vec<Record> {
    let mut cline = make_record("cline", "cline/cline", "IDE coding agent", "ide-integration");
    cline.stars = Some(48_900);
    let mut task_master = make_record(
        "claude-task-master",
        "claude-task-master",
        "task management",
        "workflow",
    );
    task_master.stars = Some(20_200);
    vec![cline, task_master]
}

#[derive(Default)]
struct Script {
    submitted: Vec<(u64, Request)>,
    replies: VecDeque<Reply>,
    answered: Vec<u64>,
    disconnected: bool,
}

/// An executor whose replies are released by the test, in any order.
///
/// Submitted requests are recorded. Nothing is answered until the test calls
/// [`ScriptHandle::answer`] (real handler output) or [`ScriptHandle::fail`].
pub struct ScriptedExecutor {
    script: Arc<Mutex<Script>>,
}

/// The test's side of a [`ScriptedExecutor`].
#[derive(Clone)]
pub struct ScriptHandle {
    script: Arc<Mutex<Script>>,
}

impl ScriptedExecutor {
    pub fn new() -> (Self, ScriptHandle) {
        let script = Arc::new(Mutex::new(Script::default()));
        (
            Self {
                script: Arc::clone(&script),
            },
            ScriptHandle { script },
        )
    }
}

impl ScriptHandle {
    /// Queue the real reply for request `id`. Returns false for unknown ids.
    pub fn answer(&self, id: u64) -> bool {
        let mut script = self.script.lock();
        let Some(request) = script
            .submitted
            .iter()
            .find(|(submitted, _)| *submitted == id)
            .map(|(_, request)| request.clone())
        else {
            return false;
        };
        script.replies.push_back(dispatch(id, request));
        script.answered.push(id);
        true
    }

    /// Answer every submitted request not answered yet, oldest first.
    pub fn answer_all(&self) {
        let pending: Vec<u64> = {
            let script = self.script.lock();
            script
                .submitted
                .iter()
                .map(|(id, _)| *id)
                .filter(|id| !script.answered.contains(id))
                .collect()
        };
        for id in pending {
            self.answer(id);
        }
    }

    /// Queue an `ERROR` reply for request `id`.
    pub fn fail(&self, id: u64, message: &str) {
        let mut script = self.script.lock();
        script.replies.push_back(Reply::error(id, message));
        script.answered.push(id);
    }

    /// Make every later call on the executor fail as if the host died.
    pub fn disconnect(&self) {
        self.script.lock().disconnected = true;
    }

    pub fn submitted_ids(&self) -> Vec<u64> {
        self.script.lock().submitted.iter().map(|(id, _)| *id).collect()
    }

    /// Queries of submitted requests of `kind`, in submit order.
    pub fn submitted_queries(&self, kind: RequestKind) -> Vec<String> {
        self.script
            .lock()
            .submitted
            .iter()
            .filter(|(_, request)| request.kind() == kind)
            .filter_map(|(_, request)| match request {
                Request::Search { query, .. } | Request::Suggestions { query, .. } => {
                    Some(query.clone())
                }
                Request::FilterSort { .. } => None,
            })
            .collect()
    }

    pub fn submitted_count(&self, kind: RequestKind) -> usize {
        self.script
            .lock()
            .submitted
            .iter()
            .filter(|(_, request)| request.kind() == kind)
            .count()
    }
}

impl Executor for ScriptedExecutor {
    fn kind(&self) -> ExecutorKind {
        ExecutorKind::Remote
    }

    fn submit(&mut self, id: u64, request: Request) -> Result<()> {
        let mut script = self.script.lock();
        if script.disconnected {
            return Err(Error::HostDisconnected);
        }
        script.submitted.push((id, request));
        Ok(())
    }

    fn try_recv(&mut self) -> Result<Option<Reply>> {
        let mut script = self.script.lock();
        match script.replies.pop_front() {
            Some(reply) => Ok(Some(reply)),
            None if script.disconnected => Err(Error::HostDisconnected),
            None => Ok(None),
        }
    }

    fn recv_timeout(&mut self, _timeout: Duration) -> Result<Option<Reply>> {
        self.try_recv()
    }
}
