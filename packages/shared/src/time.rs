//! Timestamp helpers.

use chrono::{DateTime, Local, SecondsFormat, Utc};

/// Get current Unix timestamp in UTC (milliseconds)
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as an RFC 3339 string in UTC.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn timestamp_to_rfc3339(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format a Unix timestamp (milliseconds) as local `HH:MM:SS`.
pub fn timestamp_to_local_clock(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string()
}
