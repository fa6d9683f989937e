//! # Session Context — One Explicit Value per Session
//!
//! Holds everything one interactive session works with: the loaded
//! catalog, the identity state, the response store, and the import
//! engine. Every operation takes the context explicitly; there is no
//! ambient global state.
//!
//! Read paths (queue, coverage, export) all go through the scoped catalog
//! view derived from the current permissions, so nothing outside the
//! authenticated auditor's branches and standards can leak out of any of
//! them.

use std::collections::BTreeSet;

use tracing::{info, warn};

use aflow_access::{Auditor, AuditorRegistry, AuthError, ScopedCatalog, Session};
use aflow_catalog::Catalog;
use aflow_core::{AnswerRecord, EmployeeId, ResponseKey, Timestamp};
use aflow_coverage::{standard_volume_report, CoverageReport, StandardVolume};
use aflow_store::{ImportEngine, ResponseStore, StoreError, TableBackend};

use crate::queue::AuditQueue;
use crate::submit::{validate_notes, DraftAnswer, Persistence, SubmitError, SubmitReceipt};

/// Identity stamped on records submitted in legacy (no-registry) mode.
const LEGACY_AUDITOR_ID: &str = "legacy";
const LEGACY_AUDITOR_NAME: &str = "Legacy Manager";

/// The working state of one audit session.
#[derive(Debug)]
pub struct SessionContext<B: TableBackend> {
    catalog: Catalog,
    session: Session,
    store: ResponseStore,
    engine: ImportEngine<B>,
}

impl<B: TableBackend> SessionContext<B> {
    /// Open a session over a loaded catalog, an optional auditor
    /// registry, and a backing table.
    pub fn new(catalog: Catalog, registry: Option<AuditorRegistry>, backend: B) -> Self {
        Self {
            catalog,
            session: Session::new(registry),
            store: ResponseStore::new(),
            engine: ImportEngine::new(backend),
        }
    }

    /// The loaded catalog (unscoped; prefer [`SessionContext::scoped`]).
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The identity state machine.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The session's response store.
    pub fn store(&self) -> &ResponseStore {
        &self.store
    }

    /// Authenticate by exact identifier match.
    pub fn login(&mut self, submitted_id: &str) -> Result<Auditor, AuthError> {
        self.session.login(submitted_id)
    }

    /// Return to the unauthenticated state.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// The permission-scoped catalog view for the current identity.
    pub fn scoped(&self) -> Result<ScopedCatalog<'_>, AuthError> {
        Ok(ScopedCatalog::new(&self.catalog, self.session.permissions()?))
    }

    /// Populate an empty store from legacy upload files and the remote
    /// table (remote last, therefore authoritative on collisions).
    /// Returns the informational set of conflicting keys.
    pub fn bootstrap(
        &mut self,
        legacy_files: Vec<Vec<AnswerRecord>>,
    ) -> Result<BTreeSet<ResponseKey>, StoreError> {
        self.engine.bootstrap(&mut self.store, legacy_files)
    }

    /// The ordered, paginated worklist for the current scope.
    pub fn queue(&self) -> Result<AuditQueue, AuthError> {
        Ok(AuditQueue::build(&self.scoped()?))
    }

    /// Per-employee coverage for the current scope.
    pub fn coverage_report(&self) -> Result<CoverageReport, AuthError> {
        Ok(CoverageReport::compute(&self.scoped()?, &self.store))
    }

    /// Per-standard volume for the current scope.
    pub fn standard_volumes(&self) -> Result<Vec<StandardVolume>, AuthError> {
        Ok(standard_volume_report(&self.scoped()?, &self.store))
    }

    /// Submit one employee's answer batch.
    ///
    /// All-or-nothing: scope and note validation run before anything is
    /// staged; a rejected batch leaves both the store and the remote
    /// table untouched. An accepted batch is staged into the session
    /// store, then persisted; a persistence failure keeps the staged
    /// records for a manual re-submit.
    pub fn submit(
        &mut self,
        employee_id: &EmployeeId,
        drafts: Vec<DraftAnswer>,
    ) -> Result<SubmitReceipt, SubmitError> {
        let permissions = self
            .session
            .permissions()
            .map_err(|_| SubmitError::NotAuthenticated)?;
        let view = ScopedCatalog::new(&self.catalog, permissions);

        let employee = view
            .employee(employee_id)
            .ok_or_else(|| SubmitError::EmployeeNotInScope {
                id: employee_id.to_string(),
            })?
            .clone();
        let assigned = view.assigned_standards(employee_id);
        for draft in &drafts {
            if !assigned.contains(&draft.standard_code) {
                return Err(SubmitError::StandardNotInScope {
                    code: draft.standard_code.clone(),
                    employee_id: employee_id.to_string(),
                });
            }
        }

        validate_notes(&drafts)?;

        let (auditor_id, auditor_name) = match self.session.current_auditor() {
            Some(a) => (a.id.clone(), a.name.clone()),
            // Legacy mode: implicit Manager identity.
            None => (
                aflow_core::AuditorId::new(LEGACY_AUDITOR_ID)
                    .map_err(|_| SubmitError::NotAuthenticated)?,
                LEGACY_AUDITOR_NAME.to_string(),
            ),
        };

        let stamped_at = Timestamp::now();
        let records: Vec<AnswerRecord> = drafts
            .into_iter()
            .map(|draft| AnswerRecord {
                timestamp: stamped_at,
                branch: employee.branch.clone(),
                employee_name: employee.name.clone(),
                employee_id: employee.id.clone(),
                standard_code: draft.standard_code,
                question_text: draft.question_text,
                result: draft.result,
                note: draft.note,
                auditor_name: auditor_name.clone(),
                auditor_id: auditor_id.clone(),
            })
            .collect();

        for record in &records {
            self.store.upsert(record.clone());
        }
        let staged = records.len();
        info!(employee = %employee.id, staged, "staged submission batch");

        let persistence = match self.engine.persist(&records) {
            Ok(()) => Persistence::Committed,
            Err(e) => {
                warn!(employee = %employee.id, error = %e, "persistence failed; batch retained locally");
                Persistence::FailedRetained(e)
            }
        };

        Ok(SubmitReceipt { staged, persistence })
    }

    /// Flat export rows for the current scope, in key order. Used for
    /// both dashboard preview and spreadsheet export.
    pub fn export_rows(&self) -> Result<Vec<AnswerRecord>, AuthError> {
        let permissions = self.session.permissions()?;
        Ok(self
            .store
            .query(|r| {
                permissions.branch_allowed(&r.branch)
                    && permissions.standard_allowed(&r.standard_code)
            })
            .cloned()
            .collect())
    }

    /// Wholesale reset of the session store. Individual records are never
    /// deleted.
    pub fn clear_responses(&mut self) {
        self.store.clear();
    }
}
