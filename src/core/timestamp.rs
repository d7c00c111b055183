//! Time and duration formatting for record values
//!
//! Every supported timestamp format is RFC 3339 with an explicit `Z` offset so
//! that rendered records stay parseable and independent of the host locale.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed-precision timestamp formats
///
/// # Examples
///
/// ```
/// use lambda_log_handler::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let time = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(
///     TimestampFormat::Rfc3339Nanos.format(&time),
///     "2025-01-08T10:30:45.000000000Z"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Nanosecond precision: `2025-01-08T10:30:45.123456789Z`
    #[default]
    Rfc3339Nanos,

    /// Microsecond precision: `2025-01-08T10:30:45.123456Z`
    Rfc3339Micros,

    /// Millisecond precision: `2025-01-08T10:30:45.123Z`
    Rfc3339Millis,
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        let precision = match self {
            TimestampFormat::Rfc3339Nanos => SecondsFormat::Nanos,
            TimestampFormat::Rfc3339Micros => SecondsFormat::Micros,
            TimestampFormat::Rfc3339Millis => SecondsFormat::Millis,
        };
        datetime.to_rfc3339_opts(precision, true)
    }
}

/// Human-readable duration such as `1s 500ms` or `2h 5m`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    humantime::format_duration(duration).to_string()
}
