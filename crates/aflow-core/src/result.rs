//! # Answer Result — Single Source of Truth
//!
//! Defines the `AnswerResult` enum with the three possible outcomes of a
//! checklist question. This is the ONE definition used across the entire
//! stack; every `match` on `AnswerResult` must be exhaustive.
//!
//! The lenient parser also recognizes the Portuguese labels that
//! historical export files carry ("Conforme", "Não Conforme",
//! "Não se Aplica"), so legacy imports converge on the same three
//! variants as live submissions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AflowError;

/// Outcome recorded for one checklist question of one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerResult {
    /// The employee conforms to the requirement.
    Conformant,
    /// The employee does not conform; a justification note is mandatory.
    NonConformant,
    /// The requirement does not apply to this employee.
    NotApplicable,
}

impl AnswerResult {
    /// All results in canonical order.
    pub fn all() -> &'static [AnswerResult] {
        &[Self::Conformant, Self::NonConformant, Self::NotApplicable]
    }

    /// Whether this result requires a non-empty justification note.
    pub fn requires_note(&self) -> bool {
        matches!(self, Self::NonConformant)
    }

    /// Parse a label leniently: the canonical English names, the snake_case
    /// serde form, and the Portuguese labels of historical files are all
    /// accepted, case-insensitively.
    pub fn parse_lenient(label: &str) -> Result<Self, AflowError> {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "conformant" | "conforme" => Ok(Self::Conformant),
            "non_conformant" | "nonconformant" | "não conforme" | "nao conforme" => {
                Ok(Self::NonConformant)
            }
            "not_applicable" | "notapplicable" | "não se aplica" | "nao se aplica" | "n/a" => {
                Ok(Self::NotApplicable)
            }
            _ => Err(AflowError::UnknownResult(label.to_string())),
        }
    }
}

impl FromStr for AnswerResult {
    type Err = AflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s)
    }
}

impl std::fmt::Display for AnswerResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Conformant => "Conformant",
            Self::NonConformant => "NonConformant",
            Self::NotApplicable => "NotApplicable",
        };
        f.write_str(s)
    }
}
