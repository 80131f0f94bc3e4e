//! Temporal helpers for time-windowed recall.
//!
//! Beliefs carry a single creation instant. Window queries compare that
//! instant against a caller-supplied threshold using one of four
//! comparators. Façade rows format instants as ISO-8601 seconds-precision
//! strings, and thresholds arrive as strings in the same shape.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Seconds-precision ISO-8601 layout used by façade rows and thresholds.
const ISO_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// How a fact's creation instant is compared against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFilter {
    /// Strictly earlier than the threshold.
    Before,
    /// Earlier than or equal to the threshold.
    BeforeOrAt,
    /// Strictly later than the threshold.
    After,
    /// Later than or equal to the threshold.
    AfterOrAt,
}

impl TimeFilter {
    /// Returns true if `instant` passes this filter against `threshold`.
    #[must_use]
    pub fn admits(self, instant: DateTime<Utc>, threshold: DateTime<Utc>) -> bool {
        match self {
            Self::Before => instant < threshold,
            Self::BeforeOrAt => instant <= threshold,
            Self::After => instant > threshold,
            Self::AfterOrAt => instant >= threshold,
        }
    }
}

impl std::fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Before => "before",
            Self::BeforeOrAt => "before_or_at",
            Self::After => "after",
            Self::AfterOrAt => "after_or_at",
        };
        write!(f, "{name}")
    }
}

/// Parses a threshold string into a UTC instant.
///
/// Accepts full RFC 3339 (`2024-05-01T10:30:00Z`, offsets allowed) and the
/// zone-less seconds form produced by [`format_timestamp`]
/// (`2024-05-01T10:30:00`), which is read as UTC.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimestamp`] when neither layout parses.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, ISO_SECONDS) {
        return Ok(naive.and_utc());
    }
    Err(ValidationError::InvalidTimestamp {
        input: input.to_string(),
    })
}

/// Formats an instant as a zone-less ISO-8601 seconds-precision string.
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(ISO_SECONDS).to_string()
}
