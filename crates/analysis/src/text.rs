//! Helpers for cleaning raw model replies.
//!
//! Reasoning models wrap their scratch work in `<think>` tags and like to
//! decorate answers with markdown. Every consumer in this crate runs replies
//! through some subset of these before parsing.

use once_cell::sync::Lazy;
use regex::Regex;

static REASONING_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid reasoning regex"));

const CLOSING_TAG: &str = "</think>";

/// Remove every `<think>…</think>` block.
///
/// A closing tag without an opener means the reply began mid-thought;
/// everything up to and including that tag is dropped.
pub fn strip_reasoning(text: &str) -> String {
    let stripped = REASONING_BLOCK.replace_all(text, "");
    match stripped.rfind(CLOSING_TAG) {
        Some(idx) => stripped[idx + CLOSING_TAG.len()..].to_string(),
        None => stripped.into_owned(),
    }
}

/// Collapse runs of horizontal whitespace to one space on every line.
///
/// Line breaks survive; leading and trailing spaces on each line do not.
pub fn collapse_spaces(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop markdown emphasis and heading characters (`*`, `_`, `#`).
pub fn strip_markdown(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '*' | '_' | '#'))
        .collect()
}

/// Drop `*` anywhere and heading `#`s at the start of a line, then trim.
///
/// Lighter than [`strip_markdown`]: titles may legitimately contain `_`.
pub fn strip_emphasis(line: &str) -> String {
    line.replace('*', "")
        .trim()
        .trim_start_matches('#')
        .trim()
        .to_string()
}

/// Keep the first `max` sentences, always ending in a period.
///
/// `!` and `?` followed by a space count as sentence breaks.
pub fn shorten_sentences(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let normalized = text.replace("! ", ". ").replace("? ", ". ");
    let mut short = normalized
        .split(". ")
        .take(max)
        .collect::<Vec<_>>()
        .join(". ");
    if !short.ends_with('.') {
        short.push('.');
    }
    short
}
