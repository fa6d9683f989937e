//! # Store Error Types
//!
//! Errors raised by storage backends and the import engine. Persistence
//! failures are reported to the caller and never retried automatically;
//! the in-memory store retains the attempted change so a manual re-submit
//! is possible.

use thiserror::Error;

use aflow_core::ResponseKey;

/// Error raised by a storage backend or the import engine.
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO failure against the backing table.
    #[error("backing table io error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing table's contents could not be (de)serialized.
    #[error("backing table serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A conditional upsert found a different record than expected.
    /// Only raised by keyed backends; the whole-table protocol cannot
    /// detect this situation and silently overwrites instead.
    #[error("concurrent write detected for key {key}")]
    WriteConflict {
        /// The contested composite key.
        key: ResponseKey,
    },
}
