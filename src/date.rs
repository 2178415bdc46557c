//! UTC timestamps as stored in cognition documents.
//!
//! Timestamps are ISO-8601 in UTC with millisecond resolution, e.g.
//! `2016-07-24T12:00:00.000Z`. Anything RFC 3339 parses back.

use chrono::{DateTime, SubsecRound, Utc};

/// strftime pattern of stored timestamps.
pub const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Formats an instant as a stored timestamp.
#[must_use]
pub fn format_utc(at: DateTime<Utc>) -> String {
    at.format(UTC_FORMAT).to_string()
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns the chrono parse error for text that is not RFC 3339.
pub fn parse_utc(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|d| d.with_timezone(&Utc))
}

/// Drops everything below millisecond resolution.
#[must_use]
pub fn truncate_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(3)
}
