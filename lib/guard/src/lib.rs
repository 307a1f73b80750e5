//! Route gating for the landreg platform.
//!
//! The route-rendering layer calls [`AccessGuard::evaluate`] before
//! mounting any role-scoped subtree, for every navigation. The guard
//! consults the session manager and the route's declared
//! [`RouteRequirement`], and yields allow, pending, or a redirect. It
//! never errors.
//!
//! # Example
//!
//! ```
//! use landreg_access::{
//!     CredentialStore, InMemoryCredentialRepository, InMemorySessionStore, Role,
//!     SessionManager,
//! };
//! use landreg_guard::{AccessDecision, AccessGuard, RouteRequirement};
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let credentials = CredentialStore::new(Arc::new(InMemoryCredentialRepository::new()));
//! let mut session = SessionManager::new(credentials, Arc::new(InMemorySessionStore::new()));
//! session.restore().await;
//!
//! let guard = AccessGuard::default();
//! let decision = guard.evaluate(
//!     &session,
//!     &RouteRequirement::for_role(Role::Admin),
//!     "/admin/dashboard",
//! );
//!
//! // Nobody is signed in, so the navigation is diverted to login.
//! assert!(matches!(decision, AccessDecision::Redirect { .. }));
//! # });
//! ```

pub mod guard;
pub mod requirement;

// Re-export main types at crate root
pub use guard::{AccessDecision, AccessGuard};
pub use requirement::RouteRequirement;
