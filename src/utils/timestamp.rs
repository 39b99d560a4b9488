//! ISO-8601 timestamp parsing for expiry fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

#[derive(Debug, thiserror::Error)]
#[error("Invalid ISO-8601 timestamp: '{0}'")]
pub struct TimestampError(pub String);

/// Parses an ISO-8601 timestamp into UTC.
///
/// # Accepted Forms
///
/// - RFC 3339 with offset: `2023-12-31T23:59:59Z`, `2023-12-31T23:59:59+02:00`
/// - Date-time without offset, read as UTC: `2023-12-31T23:59:59`, `2023-12-31T23:59:59.250`
/// - Bare date, read as midnight UTC: `2023-12-31`
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, TimestampError> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }

    Err(TimestampError(input.to_string()))
}
