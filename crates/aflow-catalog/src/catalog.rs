//! # The Catalog — Employees, Standards, Assignments
//!
//! The immutable reference data an audit session works against. Built once
//! per load from two tabular relations:
//!
//! - **Assignments**: `(employee_id, employee_name, branch, standard_code)`,
//!   one row per employee/standard pairing.
//! - **Questions**: `(standard_code, standard_name, question_text)`, one
//!   row per question, ordered; the row position is the question's identity
//!   within one catalog load.
//!
//! ## Edge Cases
//!
//! - Duplicate employee rows: the first row's name and branch win.
//! - An assignment referencing a standard with no cataloged questions is
//!   kept (it still counts for queue matching) but contributes zero
//!   questions to any required-count computation.
//! - Empty relations build an empty catalog; emptiness is not an error
//!   at this layer.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use aflow_core::{Branch, EmployeeId, StandardCode};

use crate::schema::{CatalogError, ASSIGNMENT_SCHEMA, QUESTION_SCHEMA};

// ─── Raw Rows ────────────────────────────────────────────────────────

/// One validated row of the assignment relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    /// The assigned employee.
    pub employee_id: EmployeeId,
    /// Display name of the employee.
    pub employee_name: String,
    /// The employee's branch.
    pub branch: Branch,
    /// The assigned standard.
    pub standard_code: StandardCode,
}

/// One validated row of the question relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRow {
    /// The standard this question belongs to.
    pub standard_code: StandardCode,
    /// Display name of the standard.
    pub standard_name: String,
    /// The question text.
    pub question_text: String,
}

// ─── Built Catalog ───────────────────────────────────────────────────

/// An employee known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// The branch the employee works at.
    pub branch: Branch,
}

/// One question of a standard, identified positionally within the
/// standard for the lifetime of one catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub text: String,
}

/// A compliance standard with its ordered questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standard {
    /// Unique standard code.
    pub code: StandardCode,
    /// Display name.
    pub display_name: String,
    /// Questions in catalog order.
    pub questions: Vec<Question>,
}

impl Standard {
    /// The number of cataloged questions: the required answer count for
    /// one employee on this standard.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// The read-only reference catalog for one session/cache window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    employees: BTreeMap<EmployeeId, Employee>,
    standards: BTreeMap<StandardCode, Standard>,
    assignments: BTreeMap<EmployeeId, BTreeSet<StandardCode>>,
}

impl Catalog {
    /// Build a catalog from validated rows.
    pub fn from_rows(assignments: Vec<AssignmentRow>, questions: Vec<QuestionRow>) -> Self {
        let mut employees = BTreeMap::new();
        let mut assignment_map: BTreeMap<EmployeeId, BTreeSet<StandardCode>> = BTreeMap::new();
        for row in assignments {
            employees.entry(row.employee_id.clone()).or_insert(Employee {
                id: row.employee_id.clone(),
                name: row.employee_name,
                branch: row.branch,
            });
            assignment_map
                .entry(row.employee_id)
                .or_default()
                .insert(row.standard_code);
        }

        let mut standards: BTreeMap<StandardCode, Standard> = BTreeMap::new();
        for row in questions {
            let standard = standards
                .entry(row.standard_code.clone())
                .or_insert(Standard {
                    code: row.standard_code,
                    display_name: row.standard_name,
                    questions: Vec::new(),
                });
            standard.questions.push(Question {
                text: row.question_text,
            });
        }

        Self {
            employees,
            standards,
            assignments: assignment_map,
        }
    }

    /// Ingest raw tables (header + string rows), validating both relations
    /// against their declared schemas, then build the catalog.
    ///
    /// # Errors
    ///
    /// Fails fast on the first missing column, empty required cell, or
    /// invalid identifier. The failure is fatal for this load only.
    pub fn from_tables<S: AsRef<str>>(
        assignment_header: &[S],
        assignment_rows: &[Vec<S>],
        question_header: &[S],
        question_rows: &[Vec<S>],
    ) -> Result<Self, CatalogError> {
        let amap = ASSIGNMENT_SCHEMA.column_map(assignment_header)?;
        let mut assignments = Vec::with_capacity(assignment_rows.len());
        for (i, row) in assignment_rows.iter().enumerate() {
            let employee_id = EmployeeId::new(amap.cell(row, i, "employee_id")?)
                .map_err(|e| amap.invalid(i, e))?;
            let branch =
                Branch::new(amap.cell(row, i, "branch")?).map_err(|e| amap.invalid(i, e))?;
            let standard_code = StandardCode::new(amap.cell(row, i, "standard_code")?)
                .map_err(|e| amap.invalid(i, e))?;
            assignments.push(AssignmentRow {
                employee_id,
                employee_name: amap.cell(row, i, "employee_name")?.to_string(),
                branch,
                standard_code,
            });
        }

        let qmap = QUESTION_SCHEMA.column_map(question_header)?;
        let mut questions = Vec::with_capacity(question_rows.len());
        for (i, row) in question_rows.iter().enumerate() {
            let standard_code = StandardCode::new(qmap.cell(row, i, "standard_code")?)
                .map_err(|e| qmap.invalid(i, e))?;
            questions.push(QuestionRow {
                standard_code,
                standard_name: qmap.cell(row, i, "standard_name")?.to_string(),
                question_text: qmap.cell(row, i, "question_text")?.to_string(),
            });
        }

        Ok(Self::from_rows(assignments, questions))
    }

    /// All employees in id order.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Look up one employee.
    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.get(id)
    }

    /// All standards in code order.
    pub fn standards(&self) -> impl Iterator<Item = &Standard> {
        self.standards.values()
    }

    /// Look up one standard.
    pub fn standard(&self, code: &StandardCode) -> Option<&Standard> {
        self.standards.get(code)
    }

    /// The set of standards assigned to an employee. Unknown employees
    /// have no assignments.
    pub fn assigned_standards(&self, id: &EmployeeId) -> impl Iterator<Item = &StandardCode> {
        self.assignments.get(id).into_iter().flatten()
    }

    /// Every branch appearing in the employee table.
    pub fn branches(&self) -> BTreeSet<Branch> {
        self.employees.values().map(|e| e.branch.clone()).collect()
    }

    /// Number of known employees.
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }
}
