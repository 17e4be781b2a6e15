//! Date helpers for invoice timing.
//!
//! Every function here is total: empty or unrecognised input yields `None`
//! (or an empty month key) instead of an error.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::debug;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Parses a calendar date or timestamp.
///
/// Date-only input resolves to midnight. Timestamps with an offset are
/// normalised to UTC.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    debug!("Unrecognised date {:?}", raw);
    None
}

/// `YYYY-MM` key for a date, or `""` when the date is unknown.
pub fn month_key_of(date: Option<NaiveDateTime>) -> String {
    date.map(|d| format!("{:04}-{:02}", d.year(), d.month()))
        .unwrap_or_default()
}

/// `YYYY-MM` key for a raw date string, or `""` if it does not parse.
pub fn month_key(raw: &str) -> String {
    month_key_of(parse_date(raw))
}

/// Whole days from `start` to `end`, rounded half away from zero.
///
/// Negative when `end` precedes `start`; `None` if either date is unknown.
pub fn days_between_dates(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Option<i64> {
    let (start, end) = (start?, end?);
    let millis = (end - start).num_milliseconds();
    Some((millis as f64 / MILLIS_PER_DAY).round() as i64)
}

/// Whole days between two raw date strings.
pub fn days_between(start_raw: &str, end_raw: &str) -> Option<i64> {
    days_between_dates(parse_date(start_raw), parse_date(end_raw))
}
