//! # Per-Standard Volume View
//!
//! The dashboard's other axis: for each scoped standard, how many scoped
//! employees are assigned to it (meta) and how many of those have fully
//! answered that standard's checklist (actual).

use serde::{Deserialize, Serialize};

use aflow_access::ScopedCatalog;
use aflow_core::StandardCode;
use aflow_store::ResponseStore;

/// Volume figures for one standard within one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardVolume {
    /// The standard.
    pub code: StandardCode,
    /// Display name.
    pub display_name: String,
    /// Scoped employees assigned to this standard.
    pub meta: usize,
    /// Of those, employees whose recorded answers for this standard
    /// alone reach the standard's question count.
    pub actual: usize,
}

impl StandardVolume {
    /// Percentage with truncating division; 0 when meta == 0.
    pub fn percentage(&self) -> usize {
        if self.meta == 0 {
            0
        } else {
            self.actual * 100 / self.meta
        }
    }
}

/// Volume for one standard, if within scope.
///
/// A standard with no cataloged questions reports `actual == 0`: with
/// nothing to answer, no employee is counted as having covered it,
/// consistent with the employee-side meta == 0 policy.
pub fn standard_volume(
    view: &ScopedCatalog<'_>,
    store: &ResponseStore,
    code: &StandardCode,
) -> Option<StandardVolume> {
    let standard = view.standard(code)?;
    let required = standard.question_count();

    let mut meta = 0;
    let mut actual = 0;
    for employee in view.employees() {
        if !view.assigned_standards(&employee.id).contains(code) {
            continue;
        }
        meta += 1;
        if required == 0 {
            continue;
        }
        let answered = store
            .query(|r| r.employee_id == employee.id && r.standard_code == *code)
            .count();
        if answered >= required {
            actual += 1;
        }
    }

    Some(StandardVolume {
        code: standard.code.clone(),
        display_name: standard.display_name.clone(),
        meta,
        actual,
    })
}

/// Volume rows for every standard in scope, in code order.
pub fn standard_volume_report(
    view: &ScopedCatalog<'_>,
    store: &ResponseStore,
) -> Vec<StandardVolume> {
    view.standards()
        .filter_map(|s| standard_volume(view, store, &s.code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aflow_access::{Auditor, Permissions, Profile, ScopeSet};
    use aflow_catalog::{AssignmentRow, Catalog, QuestionRow};
    use aflow_core::{AnswerRecord, AnswerResult, AuditorId, Branch, EmployeeId, Timestamp};

    fn assignment(employee: &str, branch: &str, standard: &str) -> AssignmentRow {
        AssignmentRow {
            employee_id: EmployeeId::new(employee).unwrap(),
            employee_name: format!("Employee {employee}"),
            branch: Branch::new(branch).unwrap(),
            standard_code: StandardCode::new(standard).unwrap(),
        }
    }

    fn question(standard: &str, text: &str) -> QuestionRow {
        QuestionRow {
            standard_code: StandardCode::new(standard).unwrap(),
            standard_name: format!("Standard {standard}"),
            question_text: text.to_string(),
        }
    }

    fn record(employee: &str, standard: &str, question: &str) -> AnswerRecord {
        AnswerRecord {
            timestamp: Timestamp::parse("2026-03-01T12:00:00Z").unwrap(),
            branch: Branch::new("A").unwrap(),
            employee_name: format!("Employee {employee}"),
            employee_id: EmployeeId::new(employee).unwrap(),
            standard_code: StandardCode::new(standard).unwrap(),
            question_text: question.to_string(),
            result: AnswerResult::Conformant,
            note: String::new(),
            auditor_name: "Ana".to_string(),
            auditor_id: AuditorId::new("AUD-1").unwrap(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_rows(
            vec![
                assignment("E1", "A", "S1"),
                assignment("E2", "A", "S1"),
                assignment("E3", "B", "S1"),
            ],
            vec![question("S1", "Q1"), question("S1", "Q2")],
        )
    }

    #[test]
    fn test_volume_counts_fully_answered_employees_only() {
        let catalog = catalog();
        let view = ScopedCatalog::new(&catalog, Permissions::manager());
        let mut store = ResponseStore::new();
        // E1 fully answers S1, E2 answers half of it.
        store.upsert(record("E1", "S1", "Q1"));
        store.upsert(record("E1", "S1", "Q2"));
        store.upsert(record("E2", "S1", "Q1"));

        let s1 = StandardCode::new("S1").unwrap();
        let volume = standard_volume(&view, &store, &s1).unwrap();
        assert_eq!(volume.meta, 3);
        assert_eq!(volume.actual, 1);
        assert_eq!(volume.percentage(), 33);
    }

    #[test]
    fn test_volume_respects_branch_scope() {
        let catalog = catalog();
        let perms = Permissions::for_auditor(&Auditor {
            id: AuditorId::new("AUD-1").unwrap(),
            name: "Ana".to_string(),
            profile: Profile::Auditor,
            allowed_branches: ScopeSet::parse("A"),
            allowed_standards: ScopeSet::All,
        });
        let view = ScopedCatalog::new(&catalog, perms);
        let store = ResponseStore::new();
        let s1 = StandardCode::new("S1").unwrap();
        let volume = standard_volume(&view, &store, &s1).unwrap();
        // E3 (branch B) is invisible to this session.
        assert_eq!(volume.meta, 2);
    }

    #[test]
    fn test_out_of_scope_standard_has_no_volume() {
        let catalog = catalog();
        let perms = Permissions::for_auditor(&Auditor {
            id: AuditorId::new("AUD-1").unwrap(),
            name: "Ana".to_string(),
            profile: Profile::Auditor,
            allowed_branches: ScopeSet::All,
            allowed_standards: ScopeSet::parse("S2"),
        });
        let view = ScopedCatalog::new(&catalog, perms);
        let store = ResponseStore::new();
        assert!(standard_volume(&view, &store, &StandardCode::new("S1").unwrap()).is_none());
    }

    #[test]
    fn test_questionless_standard_counts_nobody_covered() {
        let catalog = Catalog::from_rows(
            vec![assignment("E1", "A", "S1")],
            vec![],
        );
        let view = ScopedCatalog::new(&catalog, Permissions::manager());
        let store = ResponseStore::new();
        // S1 has an assignment but no cataloged questions at all, so the
        // catalog does not know the standard; no volume row exists.
        assert!(standard_volume(&view, &store, &StandardCode::new("S1").unwrap()).is_none());
    }

    #[test]
    fn test_report_in_code_order() {
        let catalog = Catalog::from_rows(
            vec![assignment("E1", "A", "S2"), assignment("E1", "A", "S1")],
            vec![question("S2", "Q1"), question("S1", "Q1")],
        );
        let view = ScopedCatalog::new(&catalog, Permissions::manager());
        let report = standard_volume_report(&view, &ResponseStore::new());
        let codes: Vec<_> = report.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, vec!["S1", "S2"]);
    }
}
