//! # aflow-access — Role-Based Access Control
//!
//! Scopes every read path of an audit session by the authenticated
//! auditor's permitted branches and standards.
//!
//! ## Model
//!
//! - **Profile** is binary: `Auditor` (scoped) or `Manager` (unrestricted,
//!   bypassing its own allow-lists entirely).
//! - **ScopeSet** is `All` or an explicit set; registry input accepts the
//!   literals `ALL`/`Todas`/`Todos` (case-insensitive) or a comma-separated
//!   list.
//! - **Authentication** is an exact string match against the registry.
//!   A miss is recoverable: re-prompt, no lockout, no retry limit. This is
//!   identity lookup, not credential verification — there are no passwords,
//!   tokens, or sessions to manage.
//! - **Legacy mode**: with no registry at all, the session runs as a single
//!   implicit Manager with full access.
//!
//! ## Session state machine
//!
//! ```text
//! Unauthenticated ──(successful lookup)──▶ Authenticated(permissions)
//!        ▲                                          │
//!        └──────────────(logout)────────────────────┘
//! ```

pub mod registry;
pub mod scope;
pub mod scoped;
pub mod session;

pub use registry::{Auditor, AuditorRegistry, AuthError, Profile};
pub use scope::ScopeSet;
pub use scoped::ScopedCatalog;
pub use session::{Permissions, Session, SessionState};
