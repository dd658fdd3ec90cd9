//! Timestamp display helpers.
//!
//! Both formatters share `parse_timestamp`; they differ only in what they
//! return when parsing fails. `format_datetime` is used for optional fields and
//! yields `-`, while `format_approval_date` echoes the raw input so a human can
//! still read an unusual value.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Output layout for every displayed timestamp, e.g. `01/05/2024 10:00`.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Placeholder returned by `format_datetime` for missing or unparsable input.
pub const DATETIME_FALLBACK: &str = "-";

const OFFSET_FORMATS: [&str; 1] = ["%Y-%m-%dT%H:%M%:z"];
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601-like timestamp into its wall-clock time.
///
/// A trailing `Z` is rewritten to `+00:00` first. Values carrying an offset
/// keep the local time of that offset; nothing is converted to UTC. A bare
/// date is read as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let normalized = match raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        Some(stripped) => format!("{stripped}+00:00"),
        None => raw.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Some(dt.naive_local());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Format an optional timestamp for display, or `-` when absent or invalid.
pub fn format_datetime(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| DATETIME_FALLBACK.to_string())
}

/// Format an approval timestamp for display, echoing `raw` when it cannot be parsed.
pub fn format_approval_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => {
            tracing::warn!(value = raw, "Unparsable approval date, showing it verbatim");
            raw.to_string()
        }
    }
}
