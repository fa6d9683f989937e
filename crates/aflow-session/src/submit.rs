//! # Submission Batches
//!
//! One submit action covers one employee: a batch of draft answers, one
//! per question shown on the form. The batch commits all-or-nothing: if
//! any NonConformant answer lacks a justification note, the whole batch
//! is rejected and **nothing** is staged locally — the offending
//! questions are reported by text so the form can highlight them.
//!
//! A batch that validates is staged into the session store first and
//! persisted to the remote table second; a persistence failure keeps the
//! staged records so the user can re-submit manually.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use aflow_core::{AnswerResult, StandardCode};
use aflow_store::StoreError;

/// One answer as entered on the form, before stamping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAnswer {
    /// The standard the question belongs to.
    pub standard_code: StandardCode,
    /// The full question text.
    pub question_text: String,
    /// The chosen result.
    pub result: AnswerResult,
    /// Justification note; required non-empty for NonConformant.
    pub note: String,
}

impl DraftAnswer {
    /// Whether the note satisfies the chosen result.
    pub fn note_satisfies_result(&self) -> bool {
        !self.result.requires_note() || !self.note.trim().is_empty()
    }
}

/// Why a submission was rejected. Rejection stages nothing.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The session is not authenticated.
    #[error("submission requires an authenticated session")]
    NotAuthenticated,

    /// The employee is unknown or outside the session's scope.
    #[error("employee {id:?} is not in the session's scope")]
    EmployeeNotInScope {
        /// The submitted employee identifier.
        id: String,
    },

    /// A draft targets a standard outside the employee's scoped
    /// assignments. The form never offers such questions; rejecting here
    /// keeps the store consistent if a caller bypasses the form.
    #[error("standard {code} is not in scope for employee {employee_id:?}")]
    StandardNotInScope {
        /// The out-of-scope standard.
        code: StandardCode,
        /// The target employee.
        employee_id: String,
    },

    /// NonConformant answers without a justification note.
    #[error("{} answer(s) marked NonConformant without a note", questions.len())]
    MissingNotes {
        /// The offending questions, by text, in batch order.
        questions: Vec<String>,
    },
}

/// Validate a batch's notes. All-or-nothing: the first policy violation
/// anywhere in the batch rejects the batch.
pub fn validate_notes(drafts: &[DraftAnswer]) -> Result<(), SubmitError> {
    let offending: Vec<String> = drafts
        .iter()
        .filter(|d| !d.note_satisfies_result())
        .map(|d| d.question_text.clone())
        .collect();
    if offending.is_empty() {
        Ok(())
    } else {
        Err(SubmitError::MissingNotes {
            questions: offending,
        })
    }
}

/// Whether the staged batch reached the remote table.
#[derive(Debug)]
pub enum Persistence {
    /// The remote table was replaced with the staged batch included.
    Committed,
    /// Persistence failed; the batch stays staged in session memory for
    /// a manual re-submit. There is no automatic retry.
    FailedRetained(StoreError),
}

impl Persistence {
    /// Whether the remote write succeeded.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// Outcome of an accepted submission.
#[derive(Debug)]
pub struct SubmitReceipt {
    /// Number of records staged into the session store.
    pub staged: usize,
    /// Remote persistence outcome.
    pub persistence: Persistence,
}
