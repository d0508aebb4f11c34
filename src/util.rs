//! Small display helpers shared across pages.

use chrono::{TimeZone, Utc};
use regex::RegexBuilder;

/// Format a Unix timestamp the way the archive displays dates,
/// e.g. "March 14, 2019 07:02 PM".
#[must_use]
pub fn format_timestamp(created_utc: i64) -> String {
    Utc.timestamp_opt(created_utc, 0)
        .single()
        .map_or_else(|| "Invalid Date".to_string(), |dt| {
            dt.format("%B %d, %Y %I:%M %p").to_string()
        })
}

/// Escape text for embedding in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Lowercase a query and collapse runs of whitespace, for exact matching.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape `text` for HTML and wrap case-insensitive occurrences of any of
/// `terms` in a highlight span. Returns already-escaped markup; callers
/// must treat the result as pre-escaped.
#[must_use]
pub fn highlight_terms(text: &str, terms: &[String]) -> String {
    let escaped = escape_html(text);
    let pattern = terms
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| regex::escape(&escape_html(t)))
        .collect::<Vec<_>>()
        .join("|");
    if pattern.is_empty() {
        return escaped;
    }
    let Ok(re) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
        return escaped;
    };
    re.replace_all(&escaped, r#"<span class="search-hit">$0</span>"#)
        .into_owned()
}
