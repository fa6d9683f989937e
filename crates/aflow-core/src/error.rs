//! # Error Types — Core Error Hierarchy
//!
//! Defines the error type shared by the foundational types in this crate.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations. Higher-level crates define their own error enums and
//! convert from `AflowError` where they ingest core types.

use thiserror::Error;

/// Top-level error type for the AuditFlow core types.
#[derive(Error, Debug)]
pub enum AflowError {
    /// An identifier failed validation at construction.
    #[error("invalid {kind} identifier: {reason}")]
    InvalidIdentifier {
        /// Which identifier type rejected the input.
        kind: &'static str,
        /// Why the input was rejected.
        reason: String,
    },

    /// A timestamp string could not be parsed.
    #[error("invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp {
        /// The offending input.
        input: String,
        /// Why parsing failed.
        reason: String,
    },

    /// An answer-result label could not be recognized.
    #[error("unrecognized answer result: {0:?}")]
    UnknownResult(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
