// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Off-thread host: a dedicated worker thread fed through channels.
//!
//! Requests cross the boundary as JSON text, the same envelopes a browser
//! worker would get via `postMessage`. That keeps the records the worker sees
//! separate from the caller's, and exercises the same decode path that
//! rejects unknown message types.
//!
//! The worker handles one message at a time. There is no cancellation: a
//! superseded request still runs to completion, and its reply is dropped by
//! the coordinator when it arrives.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use super::host::handle_message;
use super::protocol::{decode_reply, encode_reply, Reply, Request, Response};
use super::{Executor, ExecutorKind};
use crate::error::{Error, Result};

/// Name given to the worker thread (shows up in debuggers and panics).
pub const WORKER_THREAD_NAME: &str = "sift-search-worker";

pub struct RemoteExecutor {
    requests: Option<Sender<String>>,
    replies: Receiver<String>,
    worker: Option<JoinHandle<()>>,
    ready: bool,
}

impl RemoteExecutor {
    /// Start the worker thread.
    ///
    /// Fails only if the OS refuses to create the thread. Requests may be
    /// submitted right away; they queue until the worker picks them up.
    pub fn spawn() -> Result<Self> {
        let (request_tx, request_rx) = channel::<String>();
        let (reply_tx, reply_rx) = channel::<String>();

        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || worker_loop(request_rx, reply_tx))
            .map_err(|e| Error::HostUnavailable(e.to_string()))?;

        debug!(thread = WORKER_THREAD_NAME, "search worker spawned");

        Ok(Self {
            requests: Some(request_tx),
            replies: reply_rx,
            worker: Some(worker),
            ready: false,
        })
    }

    /// Whether `WORKER_READY` has been received yet.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn decode(&mut self, text: &str) -> Reply {
        let reply = decode_reply(text);
        if reply.response == Response::WorkerReady {
            self.ready = true;
        }
        reply
    }
}

fn worker_loop(requests: Receiver<String>, replies: Sender<String>) {
    if replies.send(encode_reply(&Reply::ready())).is_err() {
        return;
    }
    for message in requests {
        if replies.send(handle_message(&message)).is_err() {
            break;
        }
    }
    debug!("search worker exiting");
}

impl Executor for RemoteExecutor {
    fn kind(&self) -> ExecutorKind {
        ExecutorKind::Remote
    }

    fn submit(&mut self, id: u64, request: Request) -> Result<()> {
        let text = serde_json::to_string(&request.to_envelope(id)?)?;
        let sender = self.requests.as_ref().ok_or(Error::HostDisconnected)?;
        sender.send(text).map_err(|_| {
            warn!(id, "search worker is gone; request not delivered");
            Error::HostDisconnected
        })
    }

    fn try_recv(&mut self) -> Result<Option<Reply>> {
        match self.replies.try_recv() {
            Ok(text) => Ok(Some(self.decode(&text))),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(Error::HostDisconnected),
        }
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<Reply>> {
        match self.replies.recv_timeout(timeout) {
            Ok(text) => Ok(Some(self.decode(&text))),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(Error::HostDisconnected),
        }
    }
}

impl Drop for RemoteExecutor {
    fn drop(&mut self) {
        // Closing the request channel ends the worker's loop.
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("search worker panicked during shutdown");
            }
        }
    }
}
