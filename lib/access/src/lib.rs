//! Authentication and session lifecycle for the landreg platform.
//!
//! This crate provides:
//! - Role-based access control (`Role`, `Permission`, `PermissionSet`)
//! - Credential verification and mutation (`CredentialStore` over an
//!   injected `CredentialRepository`)
//! - Session lifecycle management (`SessionManager` over an injected
//!   `SessionStore`)
//! - The error taxonomy for user-facing validation failures
//!
//! # Access Control Model
//!
//! Office users hold one of two roles, `admin` or `registration`. Each
//! role resolves to a fixed set of permission tokens at login time; the
//! `all` wildcard grants every capability. The resolved set is cached
//! on the identity and persisted with the session.
//!
//! # Example
//!
//! ```
//! use landreg_access::{
//!     CredentialRecord, CredentialStore, InMemoryCredentialRepository,
//!     InMemorySessionStore, Permission, Role, Secret, SessionManager,
//! };
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let repository = InMemoryCredentialRepository::with_records([CredentialRecord::new(
//!     "admin@lrms.gov.et",
//!     Secret::new("admin123"),
//!     Role::Admin,
//!     "System Administrator",
//! )]);
//! let credentials = CredentialStore::new(Arc::new(repository));
//! let mut session = SessionManager::new(credentials, Arc::new(InMemorySessionStore::new()));
//!
//! session.restore().await;
//! session.login("admin@lrms.gov.et", "admin123").await.unwrap();
//!
//! assert!(session.has_permission(Permission::ResetPasswords));
//! # });
//! ```

pub mod config;
pub mod credential;
pub mod error;
pub mod identity;
pub mod permission;
pub mod role;
pub mod session;
pub mod store;

// Re-export main types at crate root
pub use config::AccessConfig;
pub use credential::{
    CredentialRecord, CredentialRepository, CredentialStore, InMemoryCredentialRepository, Secret,
};
pub use error::{CredentialError, SessionError};
pub use identity::{Identity, ProfileUpdate};
pub use permission::{Permission, PermissionSet};
pub use role::Role;
pub use session::{SessionManager, SessionState};
pub use store::{FileSessionStore, InMemorySessionStore, SESSION_KEY, SessionStore, SessionStoreError};
