//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC-only timestamp type truncated to seconds
//! precision, rendered as ISO8601 with Z suffix.
//!
//! ## Legacy Compatibility
//!
//! Historical export files carry timestamps in the `DD/MM/YYYY HH:MM`
//! format (no timezone, no seconds). [`Timestamp::parse_legacy()`] accepts
//! that format and interprets it as UTC, so imported rows order correctly
//! against newly recorded answers.

use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AflowError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`] — from an ISO8601 string, rejecting non-UTC offsets.
/// - [`Timestamp::parse_legacy()`] — from the historical `DD/MM/YYYY HH:MM` form.
///
/// Serde goes through [`Timestamp::parse()`] and [`Timestamp::to_iso8601()`],
/// so deserialization enforces the same invariants as construction: a
/// hand-edited backing table carrying an explicit offset is rejected, and
/// sub-second precision is truncated rather than smuggled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 / ISO8601 string.
    ///
    /// Only timestamps with the `Z` suffix are accepted. Explicit offsets
    /// like `+00:00` or `-04:00` are rejected, so that serialized rows have
    /// a single canonical rendering.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid RFC 3339 or uses a
    /// non-Z timezone offset.
    pub fn parse(s: &str) -> Result<Self, AflowError> {
        if !s.ends_with('Z') {
            return Err(AflowError::InvalidTimestamp {
                input: s.to_string(),
                reason: "must use Z suffix (UTC only)".to_string(),
            });
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| AflowError::InvalidTimestamp {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Parse a timestamp in the historical `DD/MM/YYYY HH:MM` export
    /// format, interpreted as UTC with zero seconds.
    pub fn parse_legacy(s: &str) -> Result<Self, AflowError> {
        let naive = NaiveDateTime::parse_from_str(s.trim(), "%d/%m/%Y %H:%M").map_err(|e| {
            AflowError::InvalidTimestamp {
                input: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self(Utc.from_utc_datetime(&naive)))
    }

    /// Parse either the canonical ISO8601 form or the legacy form,
    /// whichever matches. Used when ingesting uploaded history files of
    /// unknown vintage.
    pub fn parse_any(s: &str) -> Result<Self, AflowError> {
        Self::parse(s).or_else(|_| Self::parse_legacy(s))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-03-01T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
