//! # Audit Queue — Ordered, Paginated Worklist
//!
//! Orders the scoped employees for the auditor to walk through:
//! descending count of scoped-matched standards first (the employee with
//! the most overlapping standards is the best use of a site visit), then
//! ascending branch name, then ascending employee id for a total, stable
//! order.
//!
//! Employees with zero scoped matches are omitted; they have nothing to
//! be asked under the current scope.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use aflow_access::ScopedCatalog;
use aflow_core::{Branch, EmployeeId, StandardCode};

/// Fixed page size of the worklist.
pub const PAGE_SIZE: usize = 10;

/// One employee in the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Display name.
    pub employee_name: String,
    /// The employee's branch.
    pub branch: Branch,
    /// The scoped standards this employee is assigned, in code order.
    pub matched_standards: BTreeSet<StandardCode>,
}

impl QueueEntry {
    /// How many scoped standards matched.
    pub fn match_count(&self) -> usize {
        self.matched_standards.len()
    }
}

/// The ordered, paginated worklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditQueue {
    entries: Vec<QueueEntry>,
    page: usize,
}

impl AuditQueue {
    /// Build the queue from a scoped catalog view.
    pub fn build(view: &ScopedCatalog<'_>) -> Self {
        let mut entries: Vec<QueueEntry> = view
            .employees()
            .filter_map(|employee| {
                let matched = view.assigned_standards(&employee.id);
                if matched.is_empty() {
                    return None;
                }
                Some(QueueEntry {
                    employee_id: employee.id.clone(),
                    employee_name: employee.name.clone(),
                    branch: employee.branch.clone(),
                    matched_standards: matched,
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            b.match_count()
                .cmp(&a.match_count())
                .then_with(|| a.branch.cmp(&b.branch))
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });

        Self { entries, page: 0 }
    }

    /// All entries in queue order.
    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pages; an empty queue has a single empty page.
    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// The current page index.
    pub fn current_page(&self) -> usize {
        self.page
    }

    /// The entries of the current page.
    pub fn page_entries(&self) -> &[QueueEntry] {
        let start = self.page * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.entries.len());
        if start >= self.entries.len() {
            return &[];
        }
        &self.entries[start..end]
    }

    /// Jump to a page, clamped to the valid range.
    pub fn set_page(&mut self, index: usize) {
        self.page = index.min(self.page_count() - 1);
    }

    /// Advance one page; a no-op at the last page.
    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
        }
    }

    /// Go back one page; a no-op at the first page.
    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
        }
    }
}
