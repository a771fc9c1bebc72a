// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the sift command-line interface.
//!
//! Three subcommands over a JSON catalog: `search` ranks (and optionally
//! filters) it, `suggest` lists completions for a prefix, and `replay` types
//! a sequence of keystrokes into the search box with real timing so you can
//! watch debouncing and stale-reply dropping happen.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sift", about = "Catalog search and ranking engine", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank a catalog against a query
    Search {
        /// Path to catalog JSON (array of records, or {"extensions": [...]})
        file: String,

        /// Search query
        query: String,

        /// Maximum number of results to print
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Only keep records in this category ("All" keeps everything)
        #[arg(short, long)]
        category: Option<String>,

        /// Re-sort ranked results: name, stars, downloads, lastUpdated
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort direction: asc or desc
        #[arg(long, default_value = "desc")]
        order: String,

        /// Print each result's relevance score
        #[arg(long)]
        scores: bool,

        /// Run on the caller's thread instead of a worker
        #[arg(long)]
        inline: bool,

        /// Path to a SearchConfig JSON file
        #[arg(long)]
        config: Option<String>,
    },

    /// List suggestions for a prefix
    Suggest {
        /// Path to catalog JSON
        file: String,

        /// Prefix to complete
        prefix: String,

        /// Maximum number of suggestions
        #[arg(short, long, default_value = "8")]
        max: usize,
    },

    /// Type keystrokes into the search box and print what happened
    ///
    /// Each keystroke is either a full query value ("t", "te", "tes") or one
    /// of the keys :down, :up, :enter, :esc.
    Replay {
        /// Path to catalog JSON
        file: String,

        /// Query values and keys, in order
        #[arg(required = true)]
        keystrokes: Vec<String>,

        /// Pause between keystrokes in milliseconds
        #[arg(long, default_value = "50")]
        interval_ms: u64,

        /// Path to a SearchConfig JSON file
        #[arg(long)]
        config: Option<String>,
    },
}
