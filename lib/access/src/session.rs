//! Session lifecycle management.
//!
//! The session manager owns one slot of "current identity" and moves it
//! through three states:
//!
//! - `Unloaded`: before the persisted session has been checked
//! - `Anonymous`: no identity
//! - `Authenticated`: an identity is present
//!
//! Every transition either completes in full (state change plus
//! persistence) or leaves both untouched. The manager is a single
//! logical actor; a multi-threaded host wraps it in its own
//! mutual-exclusion guard.

use crate::credential::CredentialStore;
use crate::error::SessionError;
use crate::identity::{Identity, ProfileUpdate};
use crate::permission::Permission;
use crate::role::Role;
use crate::store::{SessionStore, SessionStoreError};
use std::sync::Arc;
use tracing::{info, warn};

/// The authenticated-identity slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The persisted session has not been checked yet.
    Unloaded,
    /// No identity is signed in.
    Anonymous,
    /// A principal is signed in.
    Authenticated(Identity),
}

impl SessionState {
    /// Returns true if the persisted session has not been checked.
    #[must_use]
    pub fn is_unloaded(&self) -> bool {
        matches!(self, Self::Unloaded)
    }

    /// Returns true if no principal is signed in.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Returns true if a principal is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the signed-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unloaded | Self::Anonymous => None,
        }
    }
}

/// Owns the session lifecycle: restore, login, logout, profile update.
pub struct SessionManager {
    credentials: CredentialStore,
    store: Arc<dyn SessionStore>,
    state: SessionState,
}

impl SessionManager {
    /// Creates a manager in the `Unloaded` state.
    #[must_use]
    pub fn new(credentials: CredentialStore, store: Arc<dyn SessionStore>) -> Self {
        Self {
            credentials,
            store,
            state: SessionState::Unloaded,
        }
    }

    /// Attempts to restore a persisted session.
    ///
    /// An absent, unreadable, or malformed persisted value yields
    /// `Anonymous`; malformed data is discarded with a warning, never
    /// surfaced as an error.
    pub async fn restore(&mut self) -> &SessionState {
        self.state = match self.store.load().await {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => {
                    info!(identifier = identity.identifier(), "session restored");
                    SessionState::Authenticated(identity)
                }
                Err(err) => {
                    warn!(error = %err, "discarding malformed persisted session");
                    // Best effort: drop the unusable value so the next
                    // restore does not trip over it again.
                    let _ = self.store.clear().await;
                    SessionState::Anonymous
                }
            },
            Ok(None) => SessionState::Anonymous,
            Err(err) => {
                warn!(error = %err, "session store unavailable during restore");
                SessionState::Anonymous
            }
        };
        &self.state
    }

    /// Signs in through a role-agnostic login surface.
    ///
    /// On success the identity is persisted and the session becomes
    /// `Authenticated`. On any failure the previous state and the
    /// persisted slot are untouched.
    pub async fn login(
        &mut self,
        identifier: &str,
        secret: &str,
    ) -> Result<Identity, SessionError> {
        self.authenticate(identifier, secret, None).await
    }

    /// Signs in through a role-specific login surface.
    ///
    /// A principal whose stored role differs from the surface's role is
    /// rejected with `WrongLoginSurface` after verification but before
    /// anything is persisted, so the verified identity never reaches
    /// the session.
    pub async fn login_for(
        &mut self,
        surface: Role,
        identifier: &str,
        secret: &str,
    ) -> Result<Identity, SessionError> {
        self.authenticate(identifier, secret, Some(surface)).await
    }

    async fn authenticate(
        &mut self,
        identifier: &str,
        secret: &str,
        surface: Option<Role>,
    ) -> Result<Identity, SessionError> {
        let record = self.credentials.verify(identifier, secret).await?;

        if let Some(expected) = surface {
            if record.role() != expected {
                warn!(
                    identifier,
                    role = %record.role(),
                    surface = %expected,
                    "login rejected: wrong surface"
                );
                return Err(SessionError::WrongLoginSurface {
                    role: record.role(),
                    expected,
                });
            }
        }

        let identity = Identity::new(record.identifier(), record.display_name(), record.role());
        self.persist(&identity).await?;

        info!(
            identifier = identity.identifier(),
            role = %identity.role(),
            "login succeeded"
        );
        self.state = SessionState::Authenticated(identity.clone());
        Ok(identity)
    }

    /// Signs out. Unconditionally succeeds.
    ///
    /// A store failure while clearing is logged; the stale slot is
    /// re-validated on the next restore.
    pub async fn logout(&mut self) {
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "failed to clear persisted session on logout");
        }
        if let Some(identity) = self.state.identity() {
            info!(identifier = identity.identifier(), "logged out");
        }
        self.state = SessionState::Anonymous;
    }

    /// Merges partial profile fields into the current identity and
    /// re-persists it.
    ///
    /// A silent no-op when no principal is signed in. The updated
    /// identity is persisted before the in-memory state is replaced, so
    /// a store failure leaves both as they were.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<(), SessionError> {
        let SessionState::Authenticated(current) = &self.state else {
            return Ok(());
        };

        let mut updated = current.clone();
        updated.apply(update);
        self.persist(&updated).await?;

        self.state = SessionState::Authenticated(updated);
        Ok(())
    }

    /// Returns the current state of the session slot.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the signed-in identity, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Identity> {
        self.state.identity()
    }

    /// Returns true if the signed-in identity holds the capability.
    ///
    /// False, never an error, when no principal is signed in.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.state
            .identity()
            .is_some_and(|identity| identity.has_permission(permission))
    }

    async fn persist(&self, identity: &Identity) -> Result<(), SessionError> {
        let raw = serde_json::to_string(identity).map_err(|err| SessionStoreError::Backend {
            message: err.to_string(),
        })?;
        self.store.save(&raw).await?;
        Ok(())
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
