//! Human-readable date strings for timestamps shown on the page.
//!
//! Dates render in UTC using the long form browsers print for a date value,
//! e.g. `Mon Oct 19 2026 04:42:00 GMT+0000 (Coordinated Universal Time)`.

use chrono::{DateTime, Utc};

use crate::TimestampMs;

const DISPLAY_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";
const ZONE_SUFFIX: &str = " (Coordinated Universal Time)";

pub const INVALID_DATE: &str = "Invalid Date";

/// Largest magnitude, in milliseconds, a date value may have.
const MAX_TIME_MS: f64 = 8.64e15;

pub fn format_timestamp(ms: TimestampMs) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .filter(|_| (ms as f64).abs() <= MAX_TIME_MS)
        .map(format_datetime)
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Formats a raw numeric value the way a date constructor would: fractional
/// milliseconds truncate, non-finite and out-of-range values are invalid.
pub fn format_millis_f64(ms: f64) -> String {
    if !ms.is_finite() || ms.abs() > MAX_TIME_MS {
        return INVALID_DATE.to_string();
    }
    format_timestamp(ms.trunc() as i64)
}

/// Parses a date string produced by [`format_timestamp`] or an RFC 3339
/// string and formats it again. Anything else is `Invalid Date`.
pub fn reformat_date_string(text: &str) -> String {
    parse_date_string(text)
        .map(format_datetime)
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

fn parse_date_string(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    let without_zone = trimmed.strip_suffix(ZONE_SUFFIX).unwrap_or(trimmed);
    if let Ok(parsed) = DateTime::parse_from_str(without_zone, DISPLAY_FORMAT) {
        return Some(parsed.with_timezone(&Utc));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn format_datetime(at: DateTime<Utc>) -> String {
    format!("{}{}", at.format(DISPLAY_FORMAT), ZONE_SUFFIX)
}
