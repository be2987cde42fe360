//! UTC date stamps for day-bucketed index names and document creation times

use chrono::{DateTime, SecondsFormat, Utc};

/// `YYYY.MM.DD` for the given instant, in UTC.
pub fn calendar_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y.%m.%d").to_string()
}

/// Calendar stamp for the current instant.
pub fn today() -> String {
    calendar_stamp(Utc::now())
}

/// ISO-8601 timestamp with millisecond precision and a `Z` suffix.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Timestamp for the current instant.
pub fn now() -> String {
    timestamp(Utc::now())
}
