// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the sift CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. `SIFT_THEME`
//! ("dark" or "light") wins, then `COLORFGBG`, then dark. Everything degrades
//! to plain text under `NO_COLOR` or when stdout isn't a TTY, so piping into
//! `grep` works.

use std::sync::OnceLock;

use sift::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("SIFT_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", where a bg of 7 or more (except 8) is a light background
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

/// Palette roles, not hues: callers say what a thing is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Name,
    Category,
    Stars,
    Score,
    Muted,
    Accent,
    Error,
}

impl Role {
    fn rgb(self) -> (u8, u8, u8) {
        match (theme(), self) {
            (Theme::Dark, Role::Name) => (97, 175, 239),      // #61afef
            (Theme::Dark, Role::Category) => (198, 120, 221), // #c678dd
            (Theme::Dark, Role::Stars) => (229, 192, 123),    // #e5c07b
            (Theme::Dark, Role::Score) => (152, 195, 121),    // #98c379
            (Theme::Dark, Role::Muted) => (92, 99, 112),      // #5c6370
            (Theme::Dark, Role::Accent) => (86, 182, 194),    // #56b6c2
            (Theme::Dark, Role::Error) => (224, 108, 117),    // #e06c75
            (Theme::Light, Role::Name) => (64, 120, 242),     // #4078f2
            (Theme::Light, Role::Category) => (166, 38, 164), // #a626a4
            (Theme::Light, Role::Stars) => (193, 132, 1),     // #c18401
            (Theme::Light, Role::Score) => (80, 161, 79),     // #50a14f
            (Theme::Light, Role::Muted) => (160, 161, 167),   // #a0a1a7
            (Theme::Light, Role::Accent) => (1, 132, 188),    // #0184bc
            (Theme::Light, Role::Error) => (228, 86, 73),     // #e45649
        }
    }
}

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Paint `text` in `role`, with optional modifiers like [`BOLD`].
pub fn paint(role: Role, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), rgb(role.rgb()), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_len(s));
    format!("{}{}", s, " ".repeat(pad))
}

/// Cut `text` to `max` characters, ending in an ellipsis if anything was cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// 48900 -> "48.9k"
pub fn compact_count(value: u64) -> String {
    match value {
        0..=999 => value.to_string(),
        1_000..=999_999 => format!("{:.1}k", value as f64 / 1_000.0),
        _ => format!("{:.1}M", value as f64 / 1_000_000.0),
    }
}

pub fn heading(text: &str) {
    println!("{}", paint(Role::Accent, &[BOLD], text));
}

pub fn muted(text: &str) -> String {
    paint(Role::Muted, &[], text)
}

pub fn error(text: &str) -> String {
    paint(Role::Error, &[BOLD], text)
}

/// One result line: rank, name, category, stars, optional score.
pub fn result_line(rank: usize, record: &Record, score: Option<f64>) -> String {
    let mut line = format!(
        "{} {} {}",
        muted(&format!("{:>3}.", rank)),
        pad_right(&paint(Role::Name, &[BOLD], &truncate(&record.name, 36)), 36),
        pad_right(&paint(Role::Category, &[], &record.category), 20),
    );
    if let Some(stars) = record.stars {
        line.push_str(&paint(Role::Stars, &[], &format!("★ {:>6}", compact_count(stars))));
    }
    if let Some(score) = score {
        line.push_str(&format!("  {}", paint(Role::Score, &[], &format!("{:.1}", score))));
    }
    line
}

pub fn description_line(record: &Record) -> Option<String> {
    if record.description.is_empty() {
        return None;
    }
    Some(format!("     {}", muted(&truncate(&record.description, 72))))
}
