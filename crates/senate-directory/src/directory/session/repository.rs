use super::DirectorySession;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

impl SessionId {
    pub fn next() -> Self {
        let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        SessionId(format!("session-{id:06}"))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage abstraction so the router can be exercised without a concrete backend.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, id: SessionId, session: DirectorySession) -> Result<(), SessionError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<DirectorySession>, SessionError>;

    /// Applies `change` to the stored session while holding the store's lock.
    ///
    /// The change runs against a copy that replaces the stored session only on
    /// success, so a failed change leaves the session untouched and concurrent
    /// changes to one session are serialized.
    fn modify<T, E, F>(&self, id: &SessionId, change: F) -> Result<T, E>
    where
        F: FnOnce(&mut DirectorySession) -> Result<T, E>,
        E: From<SessionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
