use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::Regex;
use reqwest::Url;

// `(?s)`: spans may cross line breaks, keeping clean_title idempotent.
static BRACKET_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\s*\[.*?\]\s*").expect("valid bracket pattern"));
static PAREN_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\s*\(.*?\)\s*").expect("valid parenthesis pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Strips bracketed and parenthesized annotations from a track title.
///
/// Every `[...]` span is replaced by a single space, then every `(...)` span,
/// then whitespace runs are collapsed and the result trimmed. Spans are
/// matched shortest-first in a single pass each, so `"Song [Remix] (feat. X)"`
/// becomes `"Song"`. An empty title is returned unchanged.
pub fn clean_title(title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }

    let title = BRACKET_SPAN.replace_all(title, " ");
    let title = PAREN_SPAN.replace_all(&title, " ");
    WHITESPACE_RUN.replace_all(&title, " ").trim().to_string()
}

/// [`clean_title`] for titles that may be missing.
pub fn clean_optional_title(title: Option<&str>) -> Option<String> {
    title.map(clean_title)
}

/// Extracts the year from a `YYYY-MM-DD` style release date.
///
/// Returns the part before the first `-`, or an empty string when there is
/// no release date.
pub fn year_from_release_date(release_date: Option<&str>) -> String {
    match release_date {
        Some(date) if !date.is_empty() => date.split('-').next().unwrap_or_default().to_string(),
        _ => String::new(),
    }
}

/// Converts milliseconds to whole seconds, rounding down. Missing is zero.
pub fn duration_seconds(duration_millis: Option<i64>) -> i64 {
    duration_millis.unwrap_or(0).div_euclid(1000)
}

/// Resolves a pagination link returned by the API.
///
/// Absolute URLs are used as they are; anything else is joined onto the API
/// origin. Returns `None` if the link cannot be turned into a URL.
pub fn resolve_next_url(api_base: &str, next: &str) -> Option<String> {
    if let Ok(url) = Url::parse(next) {
        return Some(url.to_string());
    }

    Url::parse(api_base)
        .and_then(|base| base.join(next))
        .map(|url| url.to_string())
        .ok()
}

/// Timestamp label shared by the file names of one export, e.g. `20240131_235959`.
pub fn export_timestamp(now: &DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// ISO-8601 local timestamp with microseconds, e.g. `2024-01-31T23:59:59.123456`.
pub fn iso_timestamp(now: &DateTime<Local>) -> String {
    now.naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
