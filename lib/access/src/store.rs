//! Session persistence capability.
//!
//! The session manager persists exactly one entry: the serialized
//! identity of the signed-in principal, under the well-known key
//! [`SESSION_KEY`]. The store is injected so hosts can provide a
//! durable implementation and tests an in-memory one.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::warn;

/// Well-known key for the single persisted-session entry.
pub const SESSION_KEY: &str = "user";

/// Errors from session store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStoreError {
    /// The backing store rejected the operation.
    Backend { message: String },
}

impl std::fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend { message } => write!(f, "session store backend failed: {message}"),
        }
    }
}

impl std::error::Error for SessionStoreError {}

/// Capability for persisting the current session across navigations.
///
/// `load` yields the raw persisted value, if any; interpreting it is
/// the session manager's job. Implementations must never store the
/// principal's secret.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the persisted session value, if one exists.
    async fn load(&self) -> Result<Option<String>, SessionStoreError>;

    /// Saves the session value, replacing any existing one.
    async fn save(&self, value: &str) -> Result<(), SessionStoreError>;

    /// Removes the persisted session. Removing an absent session is not
    /// an error.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}

/// In-memory session store holding a single slot.
///
/// The default store for tests and single-process hosts.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the raw slot contents.
    pub async fn snapshot(&self) -> Option<String> {
        self.slot.lock().await.clone()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<String>, SessionStoreError> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, value: &str) -> Result<(), SessionStoreError> {
        *self.slot.lock().await = Some(value.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.slot.lock().await = None;
        Ok(())
    }
}

/// File-backed session store.
///
/// Persists a one-entry JSON map keyed by [`SESSION_KEY`]. A missing or
/// unparseable file means no session; only I/O failures surface as
/// errors.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store persisting to the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<String>, SessionStoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(SessionStoreError::Backend {
                    message: err.to_string(),
                });
            }
        };

        match serde_json::from_str::<HashMap<String, String>>(&contents) {
            Ok(mut entries) => Ok(entries.remove(SESSION_KEY)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "discarding unparseable session file");
                Ok(None)
            }
        }
    }

    async fn save(&self, value: &str) -> Result<(), SessionStoreError> {
        let entries = HashMap::from([(SESSION_KEY.to_string(), value.to_string())]);
        let contents = serde_json::to_string(&entries).map_err(|err| SessionStoreError::Backend {
            message: err.to_string(),
        })?;

        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|err| SessionStoreError::Backend {
                message: err.to_string(),
            })
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionStoreError::Backend {
                message: err.to_string(),
            }),
        }
    }
}
