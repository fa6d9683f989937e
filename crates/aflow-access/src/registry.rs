//! # Auditor Registry — Identity Lookup
//!
//! The reference table of auditors permitted to run audit sessions,
//! loaded once per session/cache window and read-only thereafter.
//!
//! Authentication is an exact string match of the submitted identifier
//! against the registry. An unrecognized identifier is a recoverable
//! failure: the caller re-prompts. There is no lockout and no retry limit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use aflow_catalog::schema::{CatalogError, REGISTRY_SCHEMA};
use aflow_core::{AflowError, AuditorId};

use crate::scope::ScopeSet;

/// The two auditor profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Scoped to explicit branch/standard allow-lists.
    Auditor,
    /// Unrestricted; bypasses branch/standard filters entirely.
    Manager,
}

impl Profile {
    /// Parse a registry label, case-insensitively. Back offices have
    /// written both English and Portuguese labels.
    pub fn parse(label: &str) -> Result<Self, AflowError> {
        match label.trim().to_lowercase().as_str() {
            "auditor" | "auditora" => Ok(Self::Auditor),
            "manager" | "gestor" | "gestora" => Ok(Self::Manager),
            _ => Err(AflowError::InvalidIdentifier {
                kind: "profile",
                reason: format!("unrecognized profile label: {label:?}"),
            }),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auditor => f.write_str("AUDITOR"),
            Self::Manager => f.write_str("MANAGER"),
        }
    }
}

/// One registered auditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auditor {
    /// Unique auditor identifier (the login token).
    pub id: AuditorId,
    /// Display name.
    pub name: String,
    /// Scoped or unrestricted profile.
    pub profile: Profile,
    /// Permitted branches; ignored for Managers.
    pub allowed_branches: ScopeSet,
    /// Permitted standard codes; ignored for Managers.
    pub allowed_standards: ScopeSet,
}

/// Authentication failure.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The submitted identifier matched no registry entry.
    #[error("unknown auditor id: {id:?}")]
    UnknownAuditor {
        /// The identifier that was submitted.
        id: String,
    },

    /// An operation that requires an authenticated session ran without one.
    #[error("session is not authenticated")]
    NotAuthenticated,

    /// Login was attempted on a legacy session that has no registry.
    #[error("no auditor registry is loaded; session runs in legacy mode")]
    NoRegistry,
}

/// The loaded auditor registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditorRegistry {
    auditors: BTreeMap<AuditorId, Auditor>,
}

impl AuditorRegistry {
    /// Build a registry from already-validated auditors.
    pub fn new(auditors: impl IntoIterator<Item = Auditor>) -> Self {
        Self {
            auditors: auditors.into_iter().map(|a| (a.id.clone(), a)).collect(),
        }
    }

    /// Ingest the registry relation (header + string rows) against its
    /// declared schema.
    ///
    /// # Errors
    ///
    /// Fails fast on a missing column, an empty required cell, or an
    /// unrecognized profile label.
    pub fn from_table<S: AsRef<str>>(
        header: &[S],
        rows: &[Vec<S>],
    ) -> Result<Self, CatalogError> {
        let map = REGISTRY_SCHEMA.column_map(header)?;
        let mut auditors = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let id = AuditorId::new(map.cell(row, i, "auditor_id")?)
                .map_err(|e| map.invalid(i, e))?;
            let profile = Profile::parse(map.cell(row, i, "profile")?)
                .map_err(|e| map.invalid(i, e))?;
            // Absent allow-list cells mean an empty list, not ALL: an
            // auditor with no listed branches sees nothing until the
            // registry is corrected.
            let allowed_branches = map
                .cell_opt(row, "allowed_branches")
                .map(ScopeSet::parse)
                .unwrap_or_else(|| ScopeSet::parse(""));
            let allowed_standards = map
                .cell_opt(row, "allowed_standards")
                .map(ScopeSet::parse)
                .unwrap_or_else(|| ScopeSet::parse(""));
            auditors.push(Auditor {
                id,
                name: map.cell(row, i, "auditor_name")?.to_string(),
                profile,
                allowed_branches,
                allowed_standards,
            });
        }
        Ok(Self::new(auditors))
    }

    /// Exact-match identity lookup.
    ///
    /// # Errors
    ///
    /// `AuthError::UnknownAuditor` when no entry matches. Recoverable:
    /// the caller should re-prompt.
    pub fn authenticate(&self, submitted_id: &str) -> Result<&Auditor, AuthError> {
        let id = AuditorId::new(submitted_id).map_err(|_| AuthError::UnknownAuditor {
            id: submitted_id.to_string(),
        })?;
        self.auditors.get(&id).ok_or(AuthError::UnknownAuditor {
            id: submitted_id.to_string(),
        })
    }

    /// Number of registered auditors.
    pub fn len(&self) -> usize {
        self.auditors.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.auditors.is_empty()
    }
}
