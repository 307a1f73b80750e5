//! Credential records, the repository capability, and the credential store.
//!
//! Records are pre-provisioned; the core never creates or deletes them.
//! The repository is injected so hosts can back it with real storage
//! and tests with an in-memory fake. The store is the sole authority
//! for secret verification: the session layer never reads a secret.

use crate::config::AccessConfig;
use crate::error::CredentialError;
use crate::role::Role;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use landreg_core::UserId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Default minimum secret length, in characters.
pub const DEFAULT_MIN_SECRET_LENGTH: usize = 6;

/// An opaque login secret.
///
/// Comparable only; it has no accessor and its `Debug` output is
/// redacted so a secret can never leak through logging.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Creates a secret from its cleartext form.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns true if the supplied cleartext matches exactly.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    /// Returns the secret length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Returns true if the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// A pre-provisioned credential record for one principal.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// Internal platform ID for the record.
    id: UserId,
    /// Unique login identifier (an email address).
    identifier: String,
    /// The login secret.
    secret: Secret,
    /// The principal's access class.
    role: Role,
    /// Human-readable name.
    display_name: String,
    /// When the record was last updated.
    updated_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Creates a new record. The ID is generated automatically.
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        secret: Secret,
        role: Role,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            identifier: identifier.into(),
            secret,
            role,
            display_name: display_name.into(),
            updated_at: Utc::now(),
        }
    }

    /// Returns the internal record ID.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the principal's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns when the record was last updated.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns true if the supplied cleartext matches the stored secret.
    #[must_use]
    pub fn secret_matches(&self, candidate: &str) -> bool {
        self.secret.matches(candidate)
    }

    /// Replaces the secret in place.
    pub fn set_secret(&mut self, secret: Secret) {
        self.secret = secret;
        self.updated_at = Utc::now();
    }
}

/// Capability for credential record lookup and secret replacement.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Finds a record by its login identifier.
    async fn find(&self, identifier: &str) -> Result<Option<CredentialRecord>, CredentialError>;

    /// Replaces the secret on an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::UserNotFound`] if the identifier is
    /// unknown.
    async fn update_secret(
        &self,
        identifier: &str,
        secret: Secret,
    ) -> Result<(), CredentialError>;
}

/// In-memory credential repository.
///
/// A single mutex guards the record set so read-modify-write sequences
/// stay consistent when hosted on a multi-threaded runtime.
#[derive(Debug, Default)]
pub struct InMemoryCredentialRepository {
    records: Mutex<HashMap<String, CredentialRecord>>,
}

impl InMemoryCredentialRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-provisioned with the given records.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = CredentialRecord>) -> Self {
        Self {
            records: Mutex::new(
                records
                    .into_iter()
                    .map(|record| (record.identifier().to_string(), record))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find(&self, identifier: &str) -> Result<Option<CredentialRecord>, CredentialError> {
        Ok(self.records.lock().await.get(identifier).cloned())
    }

    async fn update_secret(
        &self,
        identifier: &str,
        secret: Secret,
    ) -> Result<(), CredentialError> {
        let mut records = self.records.lock().await;
        match records.get_mut(identifier) {
            Some(record) => {
                record.set_secret(secret);
                Ok(())
            }
            None => Err(CredentialError::UserNotFound {
                identifier: identifier.to_string(),
            }),
        }
    }
}

/// Verifies and mutates credentials through an injected repository.
#[derive(Clone)]
pub struct CredentialStore {
    repository: Arc<dyn CredentialRepository>,
    min_secret_length: usize,
}

impl CredentialStore {
    /// Creates a store with the default minimum secret length.
    #[must_use]
    pub fn new(repository: Arc<dyn CredentialRepository>) -> Self {
        Self {
            repository,
            min_secret_length: DEFAULT_MIN_SECRET_LENGTH,
        }
    }

    /// Creates a store honoring the configured minimum secret length.
    #[must_use]
    pub fn from_config(repository: Arc<dyn CredentialRepository>, config: &AccessConfig) -> Self {
        Self::new(repository).with_min_secret_length(config.min_secret_length)
    }

    /// Overrides the minimum accepted secret length.
    #[must_use]
    pub fn with_min_secret_length(mut self, min_secret_length: usize) -> Self {
        self.min_secret_length = min_secret_length;
        self
    }

    /// Resolves an identifier/secret pair to its credential record.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidCredentials`] when the
    /// identifier is unknown or the secret mismatches; the two cases
    /// are indistinguishable to the caller.
    pub async fn verify(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<CredentialRecord, CredentialError> {
        let Some(record) = self.repository.find(identifier).await? else {
            debug!(identifier, "verification failed: unknown identifier");
            return Err(CredentialError::InvalidCredentials);
        };

        if !record.secret_matches(secret) {
            debug!(identifier, "verification failed: secret mismatch");
            return Err(CredentialError::InvalidCredentials);
        }

        Ok(record)
    }

    /// Replaces a principal's secret after checking the current one.
    ///
    /// Checks run in order: the record must exist, the current secret
    /// must match, and the new secret must meet the minimum length.
    /// A failed check leaves the record untouched.
    pub async fn change_secret(
        &self,
        identifier: &str,
        current_secret: &str,
        new_secret: &str,
    ) -> Result<(), CredentialError> {
        let Some(record) = self.repository.find(identifier).await? else {
            return Err(CredentialError::UserNotFound {
                identifier: identifier.to_string(),
            });
        };

        if !record.secret_matches(current_secret) {
            return Err(CredentialError::IncorrectCurrentSecret);
        }

        let new_secret = Secret::new(new_secret);
        if new_secret.len() < self.min_secret_length {
            return Err(CredentialError::WeakSecret {
                length: new_secret.len(),
                minimum: self.min_secret_length,
            });
        }

        self.repository.update_secret(identifier, new_secret).await?;
        info!(identifier, "secret changed");
        Ok(())
    }

    /// Replaces a principal's secret on behalf of an administrator.
    ///
    /// The requesting principal is resolved through the repository, not
    /// trusted from the caller: only a stored record with the admin
    /// role authorizes the reset. No current-secret check is applied.
    pub async fn reset_secret(
        &self,
        target_identifier: &str,
        new_secret: &str,
        requesting_identifier: &str,
    ) -> Result<(), CredentialError> {
        let requester = self.repository.find(requesting_identifier).await?;
        if !requester.is_some_and(|record| record.role().is_admin()) {
            debug!(
                requesting_identifier,
                "reset refused: requester is not a known admin"
            );
            return Err(CredentialError::Unauthorized {
                identifier: requesting_identifier.to_string(),
            });
        }

        if self.repository.find(target_identifier).await?.is_none() {
            return Err(CredentialError::UserNotFound {
                identifier: target_identifier.to_string(),
            });
        }

        self.repository
            .update_secret(target_identifier, Secret::new(new_secret))
            .await?;
        info!(
            target = target_identifier,
            requested_by = requesting_identifier,
            "secret reset"
        );
        Ok(())
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("min_secret_length", &self.min_secret_length)
            .finish_non_exhaustive()
    }
}
