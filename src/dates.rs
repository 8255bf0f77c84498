//! Date serialization for the wire filter format.
//!
//! The remote service exchanges date-times as ISO-8601 strings in UTC with
//! millisecond precision (`2009-11-21T14:22:59.860Z`). Both backend writers
//! and the JSON interop in [`crate::value`] delegate here so the format is
//! defined in exactly one place.

use chrono::{DateTime, Utc};

use crate::error::QueryError;

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Serializes a date-time to its wire form.
pub fn serialize(date: &DateTime<Utc>) -> String {
    date.format(WIRE_FORMAT).to_string()
}

/// Parses a wire-format (RFC 3339) date-time string.
///
/// Offsets other than `Z` are accepted and normalized to UTC.
pub fn parse(s: &str) -> Result<DateTime<Utc>, QueryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| QueryError::InvalidArgument(format!("invalid date-time '{s}': {e}")))
}
