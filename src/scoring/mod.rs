// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how catalog records get their numbers.
//!
//! Substring hits dominate: a name that contains the query gets 100 points
//! before anything else is counted. Character overlap, popularity and recency
//! add smaller amounts on top.

mod core;
pub mod ranking;

pub use self::core::*;
pub use ranking::{rank, rank_at, rank_scored};
