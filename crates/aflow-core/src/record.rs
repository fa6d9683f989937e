//! # Answer Records and the Composite Response Key
//!
//! An answer is uniquely identified by `(employee_id, standard_code,
//! question_text)`. The question text participates in the key because
//! questions have no stable identifier across catalog loads; within one
//! catalog the row index identifies a question positionally, but persisted
//! rows must survive catalog reloads.
//!
//! ## Invariant
//!
//! At most one `AnswerRecord` exists per `ResponseKey` in any store at any
//! time. Re-answering a question replaces the prior record; no history is
//! retained.

use serde::{Deserialize, Serialize};

use crate::identity::{AuditorId, Branch, EmployeeId, StandardCode};
use crate::result::AnswerResult;
use crate::temporal::Timestamp;

/// The composite identity of an answer record.
///
/// `Ord` is derived so keyed collections iterate deterministically:
/// employee, then standard, then question text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResponseKey {
    /// The audited employee.
    pub employee_id: EmployeeId,
    /// The standard the question belongs to.
    pub standard_code: StandardCode,
    /// The full question text.
    pub question_text: String,
}

impl std::fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{:?}",
            self.employee_id, self.standard_code, self.question_text
        )
    }
}

/// One recorded answer, in the flat shape shared by the backing table and
/// spreadsheet export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// When the answer was recorded.
    pub timestamp: Timestamp,
    /// Branch of the audited employee at recording time.
    pub branch: Branch,
    /// Display name of the audited employee.
    pub employee_name: String,
    /// The audited employee.
    pub employee_id: EmployeeId,
    /// The standard the question belongs to.
    pub standard_code: StandardCode,
    /// The full question text.
    pub question_text: String,
    /// The recorded outcome.
    pub result: AnswerResult,
    /// Justification note; required non-empty iff `result` is NonConformant.
    pub note: String,
    /// Display name of the recording auditor.
    pub auditor_name: String,
    /// The recording auditor.
    pub auditor_id: AuditorId,
}

impl AnswerRecord {
    /// The composite key identifying this record.
    pub fn key(&self) -> ResponseKey {
        ResponseKey {
            employee_id: self.employee_id.clone(),
            standard_code: self.standard_code.clone(),
            question_text: self.question_text.clone(),
        }
    }

    /// Whether the note satisfies the result's requirement: NonConformant
    /// demands a non-whitespace note, other results carry any note.
    pub fn note_satisfies_result(&self) -> bool {
        !self.result.requires_note() || !self.note.trim().is_empty()
    }

    /// Whether two records carry the same payload for conflict purposes.
    /// Conflict detection compares `(result, note)` only; timestamps and
    /// auditor identity differing across sources is expected, not a
    /// conflict.
    pub fn same_payload(&self, other: &AnswerRecord) -> bool {
        self.result == other.result && self.note == other.note
    }
}
