//! Timestamp helpers.

use chrono::{SecondsFormat, Utc};

/// Current UTC time as ISO-8601 with millisecond precision,
/// e.g. `2024-01-01T12:00:00.000Z`
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
