//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all domain identifiers in the AuditFlow Stack.
//! These prevent accidental identifier confusion: you cannot pass an
//! `EmployeeId` where a `StandardCode` is expected.
//!
//! Employee identifiers are opaque text. The legacy data source stored
//! national registry numbers in a numeric column, which silently dropped
//! leading zeros; the newtype constructor keeps the string exactly as
//! given (after trimming surrounding whitespace).

use serde::{Deserialize, Serialize};

use crate::error::AflowError;

/// Unique identifier for an employee being audited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(String);

/// Code of a compliance standard (e.g. `"NR-35"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StandardCode(String);

/// Name of a branch (site/unit) where employees work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Branch(String);

/// Unique identifier for an auditor in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuditorId(String);

macro_rules! textual_id {
    ($name:ident, $kind:literal) => {
        impl $name {
            /// Construct from textual input, trimming surrounding
            /// whitespace. Empty input is rejected.
            pub fn new(raw: impl Into<String>) -> Result<Self, AflowError> {
                let trimmed = raw.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(AflowError::InvalidIdentifier {
                        kind: $kind,
                        reason: "must not be empty".to_string(),
                    });
                }
                Ok(Self(trimmed))
            }

            /// Access the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

textual_id!(EmployeeId, "employee");
textual_id!(StandardCode, "standard");
textual_id!(Branch, "branch");
textual_id!(AuditorId, "auditor");
