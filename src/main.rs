// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use std::thread;
use std::time::{Duration, Instant};

use tracing_subscriber::EnvFilter;

use sift::{
    load_catalog, score, suggest, Error, ExecutorMode, FilterOptions, Key, QueryCoordinator,
    Result, SearchConfig, SortBy, SortOrder,
};

mod cli;
use cli::display::{self, Role, BOLD};
use cli::{Cli, Commands};

/// How long the CLI waits for the host before giving up.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

fn main() {
    let filter = EnvFilter::try_from_env("SIFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Search {
            file,
            query,
            limit,
            category,
            sort_by,
            order,
            scores,
            inline,
            config,
        } => {
            let filters = FilterOptions {
                category,
                sort_by: sort_by.as_deref().map(SortBy::parse),
                sort_order: Some(parse_order(&order)),
            };
            run_search(&file, &query, limit, filters, scores, inline, config.as_deref())
        }
        Commands::Suggest { file, prefix, max } => run_suggest(&file, &prefix, max),
        Commands::Replay {
            file,
            keystrokes,
            interval_ms,
            config,
        } => run_replay(&file, &keystrokes, interval_ms, config.as_deref()),
    };

    if let Err(e) = outcome {
        eprintln!("{} {}", display::error("error:"), e);
        std::process::exit(1);
    }
}

fn parse_order(value: &str) -> SortOrder {
    match value.to_ascii_lowercase().as_str() {
        "asc" | "ascending" => SortOrder::Asc,
        _ => SortOrder::Desc,
    }
}

fn load_config(path: Option<&str>) -> Result<SearchConfig> {
    match path {
        Some(path) => SearchConfig::from_file(path),
        None => Ok(SearchConfig::default()),
    }
}

fn run_search(
    file: &str,
    query: &str,
    limit: usize,
    filters: FilterOptions,
    show_scores: bool,
    inline: bool,
    config: Option<&str>,
) -> Result<()> {
    let mut config = load_config(config)?;
    if inline {
        config.executor = ExecutorMode::Inline;
    }
    let records = load_catalog(file)?;
    let total = records.len();

    let started = Instant::now();
    let mut coordinator = QueryCoordinator::new(records, &config)?;
    coordinator.set_filters(filters);
    coordinator.input(query, Instant::now());
    coordinator.handle_key(Key::Enter);
    if !coordinator.settle(SETTLE_TIMEOUT) {
        return Err(Error::Host("timed out waiting for results".to_string()));
    }
    if let Some(message) = coordinator.error() {
        return Err(Error::Host(message.to_string()));
    }
    let elapsed = started.elapsed();

    let results = coordinator.results();
    display::heading(&format!("{} result(s) for \"{}\"", results.len(), query));
    println!(
        "{}",
        display::muted(&format!(
            "{} records · {:?} host · {:.2}ms",
            total,
            coordinator.executor_kind(),
            elapsed.as_secs_f64() * 1000.0
        ))
    );
    println!();

    for (rank, record) in results.iter().take(limit).enumerate() {
        let relevance = show_scores.then(|| score(query, record));
        println!("{}", display::result_line(rank + 1, record, relevance));
        if let Some(line) = display::description_line(record) {
            println!("{}", line);
        }
    }
    if results.len() > limit {
        println!("{}", display::muted(&format!("  … {} more", results.len() - limit)));
    }
    Ok(())
}

fn run_suggest(file: &str, prefix: &str, max: usize) -> Result<()> {
    let records = load_catalog(file)?;
    let suggestions = suggest(prefix, &records, max);
    if suggestions.is_empty() {
        println!("{}", display::muted("no suggestions"));
    }
    for suggestion in suggestions {
        println!("{}", display::paint(Role::Name, &[], &suggestion));
    }
    Ok(())
}

fn run_replay(file: &str, keystrokes: &[String], interval_ms: u64, config: Option<&str>) -> Result<()> {
    let config = load_config(config)?;
    let records = load_catalog(file)?;
    let mut coordinator = QueryCoordinator::new(records, &config)?;
    let interval = Duration::from_millis(interval_ms);
    let started = Instant::now();

    display::heading(&format!(
        "replaying {} keystroke(s), {}ms apart, {}ms debounce",
        keystrokes.len(),
        interval_ms,
        config.debounce_ms
    ));

    for (step, keystroke) in keystrokes.iter().enumerate() {
        if step > 0 {
            thread::sleep(interval);
        }
        let now = Instant::now();
        coordinator.tick(now);
        match keystroke.as_str() {
            ":down" => coordinator.handle_key(Key::ArrowDown),
            ":up" => coordinator.handle_key(Key::ArrowUp),
            ":enter" => coordinator.handle_key(Key::Enter),
            ":esc" => coordinator.handle_key(Key::Escape),
            text => coordinator.input(text, now),
        }
        coordinator.pump();

        let state = coordinator.state();
        println!(
            "{} {} query={:?} searching={} selected={} suggestions={:?}",
            display::muted(&format!("+{:>5}ms", now.duration_since(started).as_millis())),
            display::pad_right(&display::paint(Role::Accent, &[], keystroke), 10),
            state.query,
            state.is_searching,
            state.selected_suggestion_index(),
            state.suggestions,
        );
    }

    if !coordinator.settle(SETTLE_TIMEOUT) {
        return Err(Error::Host("timed out waiting for results".to_string()));
    }

    println!();
    println!(
        "{} {}",
        display::paint(Role::Score, &[BOLD], "searches dispatched:"),
        coordinator.searches_dispatched()
    );
    if let Some(message) = coordinator.error() {
        println!("{} {}", display::error("last error:"), message);
    }
    for (rank, record) in coordinator.results().iter().take(5).enumerate() {
        println!("{}", display::result_line(rank + 1, record, None));
    }
    Ok(())
}
