//! Error types for the access-control core.
//!
//! Every variant here is a recoverable, user-facing validation failure:
//! the caller (typically a form submission handler) renders a message
//! and leaves session state alone. Nothing in this module is fatal to
//! the process.

use crate::role::Role;
use crate::store::SessionStoreError;
use std::fmt;

/// Errors from credential verification and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The identifier is unknown or the secret does not match.
    ///
    /// Deliberately collapsed into one variant so login failures do not
    /// reveal which identifiers exist.
    InvalidCredentials,
    /// The identifier does not name a known record.
    UserNotFound { identifier: String },
    /// The supplied current secret does not match the stored one.
    IncorrectCurrentSecret,
    /// The new secret is shorter than the configured minimum.
    WeakSecret { length: usize, minimum: usize },
    /// The requesting principal is not allowed to reset secrets.
    Unauthorized { identifier: String },
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => {
                write!(f, "invalid identifier or secret")
            }
            Self::UserNotFound { identifier } => {
                write!(f, "no account found for {identifier}")
            }
            Self::IncorrectCurrentSecret => {
                write!(f, "current secret does not match")
            }
            Self::WeakSecret { length, minimum } => {
                write!(
                    f,
                    "new secret is too short: {length} characters, minimum is {minimum}"
                )
            }
            Self::Unauthorized { identifier } => {
                write!(f, "{identifier} is not authorized to reset secrets")
            }
        }
    }
}

impl std::error::Error for CredentialError {}

/// Errors from session lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Credential verification or mutation failed.
    Credentials(CredentialError),
    /// The principal authenticated, but through the wrong login surface.
    ///
    /// The verified identity is discarded; nothing is persisted.
    WrongLoginSurface { role: Role, expected: Role },
    /// The session store rejected a write.
    Store(SessionStoreError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credentials(err) => write!(f, "{err}"),
            Self::WrongLoginSurface { role, expected } => {
                write!(
                    f,
                    "account with role '{role}' cannot sign in through the '{expected}' login"
                )
            }
            Self::Store(err) => write!(f, "session store failure: {err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Credentials(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::WrongLoginSurface { .. } => None,
        }
    }
}

impl From<CredentialError> for SessionError {
    fn from(err: CredentialError) -> Self {
        Self::Credentials(err)
    }
}

impl From<SessionStoreError> for SessionError {
    fn from(err: SessionStoreError) -> Self {
        Self::Store(err)
    }
}
