//! # aflow-catalog — Read-Only Reference Catalog
//!
//! Loads and serves the reference data an audit session works against:
//! which employees exist, which branch they belong to, which standards
//! they are assigned, and the ordered questions of each standard.
//!
//! ## Design
//!
//! - **Declared schema at ingestion** (`schema.rs`): each tabular relation
//!   has a fixed set of required columns validated once when the table is
//!   ingested. A missing column is a structured, fatal-for-this-load error
//!   naming the relation and the column. There is no case-insensitive
//!   column sniffing scattered through read paths.
//!
//! - **Immutable after build** (`catalog.rs`): `Catalog` is constructed
//!   from raw rows and then only read. Reload means building a new
//!   `Catalog`.
//!
//! ## Crate Policy
//!
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Catalog accessors never perform I/O.

pub mod catalog;
pub mod schema;

pub use catalog::{AssignmentRow, Catalog, Employee, Question, QuestionRow, Standard};
pub use schema::{CatalogError, TableSchema, ASSIGNMENT_SCHEMA, QUESTION_SCHEMA, REGISTRY_SCHEMA};
