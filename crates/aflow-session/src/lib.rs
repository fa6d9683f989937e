//! # aflow-session — Session Orchestration
//!
//! Ties the stack together for one interactive session. Earlier
//! deployments kept their working state in ambient per-process globals;
//! here everything lives in one explicit `SessionContext` value that is
//! passed to every operation.
//!
//! ## Control flow
//!
//! Catalog loads → the session authenticates (or runs in legacy Manager
//! mode) → the import engine populates the response store from available
//! sources → the queue builder orders and paginates the scoped employee
//! worklist → the user submits answer batches → the store upserts and the
//! engine persists → coverage recomputes from the scoped catalog + store.

pub mod context;
pub mod queue;
pub mod submit;

pub use context::SessionContext;
pub use queue::{AuditQueue, QueueEntry, PAGE_SIZE};
pub use submit::{DraftAnswer, Persistence, SubmitError, SubmitReceipt};
