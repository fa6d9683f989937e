//! # Session Identity State Machine
//!
//! A long-lived interactive session is either unauthenticated or
//! authenticated with a permission set. Logout returns to unauthenticated;
//! there is no terminal state.
//!
//! With no registry loaded at all, the session runs in legacy mode: a
//! single implicit Manager with full access, on which login and logout are
//! both unavailable/no-ops.

use serde::{Deserialize, Serialize};

use aflow_core::{Branch, StandardCode};

use crate::registry::{Auditor, AuditorRegistry, AuthError, Profile};
use crate::scope::ScopeSet;

/// The effective permission set of an authenticated identity.
///
/// Managers are unrestricted **regardless of their own allow-lists**; the
/// lists are only consulted for the Auditor profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    unrestricted: bool,
    branches: ScopeSet,
    standards: ScopeSet,
}

impl Permissions {
    /// Derive the effective permissions of one registered auditor.
    pub fn for_auditor(auditor: &Auditor) -> Self {
        match auditor.profile {
            Profile::Manager => Self::manager(),
            Profile::Auditor => Self {
                unrestricted: false,
                branches: auditor.allowed_branches.clone(),
                standards: auditor.allowed_standards.clone(),
            },
        }
    }

    /// Unrestricted permissions (Manager profile or legacy mode).
    pub fn manager() -> Self {
        Self {
            unrestricted: true,
            branches: ScopeSet::All,
            standards: ScopeSet::All,
        }
    }

    /// Whether every filter is bypassed.
    pub fn is_unrestricted(&self) -> bool {
        self.unrestricted
    }

    /// Whether a branch is within scope.
    pub fn branch_allowed(&self, branch: &Branch) -> bool {
        self.unrestricted || self.branches.contains(branch.as_str())
    }

    /// Whether a standard is within scope.
    pub fn standard_allowed(&self, code: &StandardCode) -> bool {
        self.unrestricted || self.standards.contains(code.as_str())
    }
}

/// The identity state of one session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No identity; only login is available.
    Unauthenticated,
    /// Authenticated as a registered auditor.
    Authenticated(Auditor),
    /// No registry exists; implicit Manager with full access.
    LegacyManager,
}

impl SessionState {
    /// Whether read paths are available in this state.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_) | Self::LegacyManager)
    }
}

/// One interactive session's identity, driven by the loaded registry.
#[derive(Debug, Clone)]
pub struct Session {
    registry: Option<AuditorRegistry>,
    state: SessionState,
}

impl Session {
    /// Start a session. With a registry the session starts
    /// unauthenticated; without one it starts in legacy Manager mode.
    pub fn new(registry: Option<AuditorRegistry>) -> Self {
        let state = match registry {
            Some(_) => SessionState::Unauthenticated,
            None => SessionState::LegacyManager,
        };
        Self { registry, state }
    }

    /// Authenticate by exact identifier match.
    ///
    /// # Errors
    ///
    /// - `AuthError::NoRegistry` in legacy mode (there is nothing to match).
    /// - `AuthError::UnknownAuditor` on a miss; the state is unchanged and
    ///   the caller may retry without limit.
    pub fn login(&mut self, submitted_id: &str) -> Result<Auditor, AuthError> {
        let registry = self.registry.as_ref().ok_or(AuthError::NoRegistry)?;
        let auditor = registry.authenticate(submitted_id)?.clone();
        self.state = SessionState::Authenticated(auditor.clone());
        Ok(auditor)
    }

    /// Return to the unauthenticated state. A no-op when unauthenticated
    /// or in legacy mode.
    pub fn logout(&mut self) {
        if matches!(self.state, SessionState::Authenticated(_)) {
            self.state = SessionState::Unauthenticated;
        }
    }

    /// The current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The authenticated auditor, if any. Legacy mode has none.
    pub fn current_auditor(&self) -> Option<&Auditor> {
        match &self.state {
            SessionState::Authenticated(a) => Some(a),
            _ => None,
        }
    }

    /// The effective permissions of the current state.
    ///
    /// # Errors
    ///
    /// `AuthError::NotAuthenticated` when no identity is established.
    pub fn permissions(&self) -> Result<Permissions, AuthError> {
        match &self.state {
            SessionState::Authenticated(a) => Ok(Permissions::for_auditor(a)),
            SessionState::LegacyManager => Ok(Permissions::manager()),
            SessionState::Unauthenticated => Err(AuthError::NotAuthenticated),
        }
    }
}
