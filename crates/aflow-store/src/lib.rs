//! # aflow-store — The Keyed Answer Store
//!
//! The authoritative mapping of answer records keyed by the composite
//! `(employee_id, standard_code, question_text)` identity, plus the
//! machinery that populates it from multiple sources and persists it to a
//! remote backing table.
//!
//! ## Components
//!
//! - **`ResponseStore`** (`store.rs`): upsert semantics, ordered bulk
//!   merge with last-occurrence-wins deduplication, pre-dedup conflict
//!   detection, and predicate queries.
//!
//! - **Backends** (`backend.rs`, `keyed.rs`): the remote table is modeled
//!   two ways. `TableBackend` is the faithful model of the legacy
//!   deployment — whole-table read/write with no row-level transactions
//!   (a JSON file standing in for the spreadsheet-as-database).
//!   `KeyedBackend` is the recommended upgrade: atomic conditional upsert
//!   per key, surfacing write conflicts instead of losing them.
//!
//! - **`ImportEngine`** (`import.rs`): session bootstrap from
//!   [legacy files..., remote table] and the optimistic read-modify-write
//!   persistence protocol, including its documented lost-update window.
//!
//! ## Merge order
//!
//! The canonical source order is: session memory first, then uploaded
//! legacy files in upload order, then the remote backing table last.
//! Later sources win on colliding keys, so the remote table is
//! authoritative at bootstrap time.

pub mod backend;
pub mod error;
pub mod import;
pub mod keyed;
pub mod store;

pub use backend::{JsonTableBackend, MemoryTableBackend, TableBackend};
pub use error::StoreError;
pub use import::ImportEngine;
pub use keyed::{KeyedBackend, MemoryKeyedBackend};
pub use store::ResponseStore;
