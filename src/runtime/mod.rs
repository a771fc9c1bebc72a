// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Execution hosts: where ranking, suggestions and filtering actually run.
//!
//! Two flavors behind one [`Executor`] trait. `RemoteExecutor` owns a worker
//! thread and talks JSON envelopes over channels; `InlineExecutor` runs the
//! same handler synchronously on the caller's thread. The coordinator can't
//! tell them apart except by timing.
//!
//! With the `worker` feature disabled only the inline host exists, and asking
//! for a remote one falls back (or fails, for [`ExecutorMode::Remote`]).

pub mod host;
pub mod inline;
pub mod protocol;
#[cfg(feature = "worker")]
pub mod remote;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::Result;

pub use inline::InlineExecutor;
pub use protocol::{Envelope, MessageType, Reply, Request, RequestKind, Response};
#[cfg(feature = "worker")]
pub use remote::RemoteExecutor;

/// Which host is actually running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorKind {
    Inline,
    Remote,
}

/// Which host to ask for at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorMode {
    /// Remote if a worker thread can be started, inline otherwise.
    #[default]
    Auto,
    Inline,
    /// Remote or nothing.
    Remote,
}

/// Request/response channel to an execution host.
///
/// `submit` is fire-and-forget. Replies arrive through `try_recv` or
/// `recv_timeout`, tagged with the id passed to `submit`, possibly
/// interleaved with an unsolicited `WORKER_READY`.
pub trait Executor: Send {
    fn kind(&self) -> ExecutorKind;

    fn submit(&mut self, id: u64, request: Request) -> Result<()>;

    /// Next reply if one is waiting. `Err` means the host is gone.
    fn try_recv(&mut self) -> Result<Option<Reply>>;

    /// Wait up to `timeout` for the next reply.
    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<Reply>>;
}

/// Build the host selected by `mode`.
pub fn spawn_executor(mode: ExecutorMode) -> Result<Box<dyn Executor>> {
    match mode {
        ExecutorMode::Inline => Ok(Box::new(InlineExecutor::new())),
        ExecutorMode::Remote => spawn_remote(),
        ExecutorMode::Auto => match spawn_remote() {
            Ok(executor) => Ok(executor),
            Err(e) => {
                warn!(error = %e, "worker unavailable, running searches inline");
                Ok(Box::new(InlineExecutor::new()))
            }
        },
    }
}

#[cfg(feature = "worker")]
fn spawn_remote() -> Result<Box<dyn Executor>> {
    let executor = RemoteExecutor::spawn()?;
    Ok(Box::new(executor))
}

#[cfg(not(feature = "worker"))]
fn spawn_remote() -> Result<Box<dyn Executor>> {
    debug!("built without the `worker` feature");
    Err(crate::error::Error::HostUnavailable(
        "built without the `worker` feature".to_string(),
    ))
}

/// Replacement host after the current one failed. Always inline.
pub(crate) fn fallback_executor() -> Box<dyn Executor> {
    debug!("switching to inline execution host");
    Box::new(InlineExecutor::new())
}
