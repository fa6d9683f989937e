//! # aflow-coverage — Meta vs Actual Coverage
//!
//! Computes, for the scoped view of a session, how much of the required
//! checklist has actually been answered.
//!
//! ## Vocabulary
//!
//! - **meta**: the required answer count — for a standard, its cataloged
//!   question count; for an employee, the sum over their scoped assigned
//!   standards.
//! - **actual**: the recorded answer count, always cross-referenced
//!   against the catalog's assignment map, never a raw per-employee row
//!   count (a stray record for an unassigned standard must not inflate
//!   coverage).
//!
//! ## Status policy
//!
//! `actual == 0` ⇒ Pending; `0 < actual < meta` ⇒ Partial;
//! `actual >= meta` with `meta > 0` ⇒ Complete.
//!
//! Employees with `meta == 0` (no scoped assignments, or assignments to
//! standards with no cataloged questions) are classified Pending and are
//! **excluded from completion-rate denominators**; their percentage
//! displays as 0. There is nothing to audit for them, so counting them as
//! trivially complete would overstate coverage, and counting them in the
//! denominator would understate it.
//!
//! All inputs arrive through `ScopedCatalog`, so every figure this crate
//! produces already respects the session's branch/standard permissions.

pub mod employee;
pub mod standard;

pub use employee::{employee_coverage, CoverageReport, CoverageStatus, CoverageSummary, EmployeeCoverage};
pub use standard::{standard_volume, standard_volume_report, StandardVolume};
