//! # Per-Employee Coverage
//!
//! For each scoped employee: required count (meta), recorded count
//! (actual), status classification, and aggregate counts across the
//! scoped employee set.

use serde::{Deserialize, Serialize};

use aflow_access::ScopedCatalog;
use aflow_core::{Branch, EmployeeId};
use aflow_store::ResponseStore;

/// Coverage classification of one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// Nothing recorded yet (or nothing to audit).
    Pending,
    /// Some but not all required answers recorded.
    Partial,
    /// Every required answer recorded.
    Complete,
}

impl std::fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Partial => "PARTIAL",
            Self::Complete => "COMPLETE",
        };
        f.write_str(s)
    }
}

/// Coverage figures for one employee within one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCoverage {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Display name.
    pub employee_name: String,
    /// The employee's branch.
    pub branch: Branch,
    /// Required answers: Σ question counts over scoped assigned standards.
    pub meta: usize,
    /// Recorded answers within the scoped assigned standards.
    pub actual: usize,
}

impl EmployeeCoverage {
    /// Status classification under the documented meta == 0 policy.
    pub fn status(&self) -> CoverageStatus {
        if self.meta == 0 || self.actual == 0 {
            CoverageStatus::Pending
        } else if self.actual < self.meta {
            CoverageStatus::Partial
        } else {
            CoverageStatus::Complete
        }
    }

    /// Percentage with truncating division; 0 when meta == 0.
    pub fn percentage(&self) -> usize {
        if self.meta == 0 {
            0
        } else {
            self.actual * 100 / self.meta
        }
    }

    /// The dashboard rendering, e.g. `2/3 (66%)`.
    pub fn display_ratio(&self) -> String {
        format!("{}/{} ({}%)", self.actual, self.meta, self.percentage())
    }
}

/// Coverage for one employee, if within scope.
pub fn employee_coverage(
    view: &ScopedCatalog<'_>,
    store: &ResponseStore,
    id: &EmployeeId,
) -> Option<EmployeeCoverage> {
    let employee = view.employee(id)?;
    let assigned = view.assigned_standards(id);

    let meta: usize = assigned
        .iter()
        .map(|code| {
            view.standard(code)
                .map(|s| s.question_count())
                .unwrap_or(0)
        })
        .sum();

    let actual = store
        .query(|r| r.employee_id == *id && assigned.contains(&r.standard_code))
        .count();

    Some(EmployeeCoverage {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        branch: employee.branch.clone(),
        meta,
        actual,
    })
}

/// Aggregate counts over the scoped employee set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Employees with nothing recorded (includes meta == 0 employees).
    pub pending: usize,
    /// Employees partially covered.
    pub partial: usize,
    /// Employees fully covered.
    pub complete: usize,
    /// Employees with meta == 0, excluded from the completion rate.
    pub unassessable: usize,
}

impl CoverageSummary {
    /// Share of assessable employees that are complete, truncating; 0
    /// when no employee is assessable.
    pub fn completion_rate_percent(&self) -> usize {
        let assessable = self.pending + self.partial + self.complete - self.unassessable;
        if assessable == 0 {
            0
        } else {
            self.complete * 100 / assessable
        }
    }
}

/// Per-employee rows plus the aggregate summary for one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// One row per scoped employee, in employee-id order.
    pub rows: Vec<EmployeeCoverage>,
    /// Aggregate counts.
    pub summary: CoverageSummary,
}

impl CoverageReport {
    /// Compute the report for every employee in scope.
    pub fn compute(view: &ScopedCatalog<'_>, store: &ResponseStore) -> Self {
        let mut rows = Vec::new();
        let mut summary = CoverageSummary::default();
        for employee in view.employees() {
            // Employee comes from the scoped view, so coverage exists.
            if let Some(coverage) = employee_coverage(view, store, &employee.id) {
                if coverage.meta == 0 {
                    summary.unassessable += 1;
                }
                match coverage.status() {
                    CoverageStatus::Pending => summary.pending += 1,
                    CoverageStatus::Partial => summary.partial += 1,
                    CoverageStatus::Complete => summary.complete += 1,
                }
                rows.push(coverage);
            }
        }
        Self { rows, summary }
    }
}
