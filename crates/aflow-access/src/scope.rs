//! # Scope Sets — ALL or an Explicit Allow-List
//!
//! A `ScopeSet` is the permitted set of branches or standard codes for one
//! auditor: either the universal set or an explicit list. Registry files
//! written by different back offices use `ALL`, `Todas`, or `Todos` for the
//! universal set; all three are accepted case-insensitively.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The permitted set for one axis (branches or standards).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeSet {
    /// The universal set: everything is permitted.
    All,
    /// Only the listed values are permitted.
    Listed(BTreeSet<String>),
}

impl ScopeSet {
    /// Parse registry input: the literals `ALL`/`Todas`/`Todos`
    /// (case-insensitive) mean the universal set; anything else is a
    /// comma-separated list. Empty items are dropped; an entirely empty
    /// input yields an empty list, which permits nothing.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if matches!(
            trimmed.to_lowercase().as_str(),
            "all" | "todas" | "todos"
        ) {
            return Self::All;
        }
        let listed: BTreeSet<String> = trimmed
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self::Listed(listed)
    }

    /// Whether a value is within scope.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Listed(set) => set.contains(value),
        }
    }

    /// Whether this is the universal set.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl std::fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Listed(set) => {
                let mut first = true;
                for item in set {
                    if !first {
                        f.write_str(",")?;
                    }
                    f.write_str(item)?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}
