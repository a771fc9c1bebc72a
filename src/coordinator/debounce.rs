// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A per-owner debounce timer with an explicit clock.
//!
//! `schedule` replaces whatever was pending and restarts the delay; `fire`
//! hands the latest value to a callback once the delay has passed. Time is
//! passed in rather than read, so owners drive it from their own event loop
//! and tests drive it from a fake clock.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value and restart the timer from `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Drop the pending value, returning it if there was one.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Call `callback` with the pending value if its deadline has passed.
    ///
    /// Returns whether the callback ran.
    pub fn fire(&mut self, now: Instant, callback: impl FnOnce(T)) -> bool {
        match self.pending.take() {
            Some(pending) if pending.deadline <= now => {
                callback(pending.value);
                true
            }
            still_waiting => {
                self.pending = still_waiting;
                false
            }
        }
    }

    /// Call `callback` with the pending value right away, deadline or not.
    pub fn flush(&mut self, callback: impl FnOnce(T)) -> bool {
        match self.cancel() {
            Some(value) => {
                callback(value);
                true
            }
            None => false,
        }
    }
}
