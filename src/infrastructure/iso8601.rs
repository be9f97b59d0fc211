//! ISO-8601 timestamp parsing shared by the file source and the SQLite store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("not an ISO-8601 timestamp: {0:?}")]
pub struct TimestampError(pub String);

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses RFC 3339 text, or a naive date-time / date which is taken as UTC.
///
/// # Errors
///
/// Returns `TimestampError` if no accepted layout matches.
pub fn parse(text: &str) -> Result<DateTime<Utc>, TimestampError> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimestampError(text.to_string()))
}

/// Text written to storage: RFC 3339 with the UTC offset
#[must_use]
pub fn format(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339()
}
