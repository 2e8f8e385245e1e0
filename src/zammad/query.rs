//! Filter expressions for Zammad's ticket search.

use chrono::{DateTime, Utc};

pub const ALL_TICKETS: &str = "*";

const SINCE_PLACEHOLDER: &str = "{since}";

/// Formats an instant the way Zammad's date filters expect it.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

pub fn created_since(since: &str) -> String {
    format!("created_at:>={since}")
}

/// Substitutes every `{since}` in a configured closed-ticket filter.
pub fn closed_since(template: &str, since: &str) -> String {
    template.replace(SINCE_PLACEHOLDER, since)
}
