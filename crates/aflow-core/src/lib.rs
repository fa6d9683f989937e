//! # aflow-core — Foundational Types for the AuditFlow Stack
//!
//! This crate is the bedrock of the AuditFlow Stack. It defines the core
//! type-system primitives shared by every other crate in the workspace;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `EmployeeId`,
//!    `StandardCode`, `Branch`, `AuditorId` — all newtypes with validated
//!    constructors. No bare strings for identifiers. Employee identifiers
//!    are opaque text: numeric registry numbers keep their leading zeros
//!    by construction.
//!
//! 2. **Single `AnswerResult` enum.** One definition, three variants,
//!    exhaustive `match` everywhere. The lenient parser accepts the labels
//!    historical export files used, so imported data converges on the same
//!    three variants.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision, with a lenient parser for the
//!    `DD/MM/YYYY HH:MM` format found in historical files.
//!
//! 4. **`ResponseKey` as composite identity.** The unique identity of an
//!    answer is `(employee_id, standard_code, question_text)`. All store
//!    deduplication, merging, and conflict detection flows through this
//!    one key type.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `aflow-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod record;
pub mod result;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::AflowError;
pub use identity::{AuditorId, Branch, EmployeeId, StandardCode};
pub use record::{AnswerRecord, ResponseKey};
pub use result::AnswerResult;
pub use temporal::Timestamp;
