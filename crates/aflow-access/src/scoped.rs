//! # Scoped Catalog View
//!
//! The access-control filter applied to the catalog: every read path
//! (employee list, standard list, assignment lookups, branch list) is
//! intersected with the session's permitted branches and standards.
//!
//! Downstream components (coverage, queue, export) consume only this view,
//! never the raw catalog, so an out-of-scope branch can never leak into a
//! worklist, a metric, or an export.

use aflow_catalog::{Catalog, Employee, Standard};
use aflow_core::{Branch, EmployeeId, StandardCode};
use std::collections::BTreeSet;

use crate::session::Permissions;

/// A permission-filtered view over a catalog.
#[derive(Debug, Clone)]
pub struct ScopedCatalog<'a> {
    catalog: &'a Catalog,
    permissions: Permissions,
}

impl<'a> ScopedCatalog<'a> {
    /// Wrap a catalog with a permission set.
    pub fn new(catalog: &'a Catalog, permissions: Permissions) -> Self {
        Self {
            catalog,
            permissions,
        }
    }

    /// The permissions this view filters by.
    pub fn permissions(&self) -> &Permissions {
        &self.permissions
    }

    /// The underlying catalog. Callers needing unscoped data must hold a
    /// Manager permission set; prefer the scoped accessors.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Employees whose branch is within scope, in id order.
    pub fn employees(&self) -> impl Iterator<Item = &'a Employee> + '_ {
        self.catalog
            .employees()
            .filter(|e| self.permissions.branch_allowed(&e.branch))
    }

    /// One employee, if within scope.
    pub fn employee(&self, id: &EmployeeId) -> Option<&'a Employee> {
        self.catalog
            .employee(id)
            .filter(|e| self.permissions.branch_allowed(&e.branch))
    }

    /// Standards whose code is within scope, in code order.
    pub fn standards(&self) -> impl Iterator<Item = &'a Standard> + '_ {
        self.catalog
            .standards()
            .filter(|s| self.permissions.standard_allowed(&s.code))
    }

    /// One standard, if within scope.
    pub fn standard(&self, code: &StandardCode) -> Option<&'a Standard> {
        if !self.permissions.standard_allowed(code) {
            return None;
        }
        self.catalog.standard(code)
    }

    /// The employee's assigned standards intersected with the permitted
    /// standard set. The employee itself must be in scope; otherwise the
    /// result is empty.
    pub fn assigned_standards(&self, id: &EmployeeId) -> BTreeSet<StandardCode> {
        if self.employee(id).is_none() {
            return BTreeSet::new();
        }
        self.catalog
            .assigned_standards(id)
            .filter(|code| self.permissions.standard_allowed(code))
            .cloned()
            .collect()
    }

    /// Branches within scope that appear in the employee table.
    pub fn branches(&self) -> BTreeSet<Branch> {
        self.catalog
            .branches()
            .into_iter()
            .filter(|b| self.permissions.branch_allowed(b))
            .collect()
    }
}
