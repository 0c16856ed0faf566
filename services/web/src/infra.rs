use chrono::{DateTime, Duration, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use senate_directory::config::SessionConfig;
use senate_directory::directory::{
    DirectoryHandle, DirectorySession, SessionError, SessionId, SessionRepository,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration as StdDuration;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) directory: Arc<DirectoryHandle>,
}

/// Process-local session store bounded by an idle timeout and a capacity.
///
/// Expired sessions are dropped on insert and on lookup; when the store is full
/// the least recently touched session makes room for the new one.
#[derive(Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, StoredSession>>>,
    idle: Duration,
    capacity: usize,
}

#[derive(Clone)]
struct StoredSession {
    session: DirectorySession,
    touched: DateTime<Utc>,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl InMemorySessionRepository {
    pub(crate) fn new(config: &SessionConfig) -> Self {
        let idle = StdDuration::from_secs(config.idle_secs);
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle: Duration::from_std(idle).unwrap_or_else(|_| Duration::weeks(52 * 100)),
            capacity: config.capacity.max(1),
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, HashMap<SessionId, StoredSession>>, SessionError> {
        self.sessions
            .lock()
            .map_err(|_| SessionError::Unavailable("session mutex poisoned".to_string()))
    }

    fn is_expired(&self, stored: &StoredSession, now: DateTime<Utc>) -> bool {
        now - stored.touched > self.idle
    }

    /// Drops `id` when it has sat idle too long; returns whether it was dropped.
    fn evict_if_expired(
        &self,
        sessions: &mut HashMap<SessionId, StoredSession>,
        id: &SessionId,
        now: DateTime<Utc>,
    ) -> bool {
        let expired = sessions
            .get(id)
            .is_some_and(|stored| self.is_expired(stored, now));
        if expired {
            sessions.remove(id);
            tracing::debug!(session = %id, "expired directory session dropped");
        }
        expired
    }

    fn insert_at(
        &self,
        id: SessionId,
        session: DirectorySession,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&id) {
            return Err(SessionError::Conflict);
        }

        let before = guard.len();
        guard.retain(|_, stored| !self.is_expired(stored, now));
        while guard.len() >= self.capacity {
            let oldest = guard
                .iter()
                .min_by_key(|(_, stored)| stored.touched)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(oldest) => {
                    guard.remove(&oldest);
                }
                None => break,
            }
        }
        let evicted = before - guard.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = guard.len(), "evicted directory sessions");
        }

        guard.insert(
            id,
            StoredSession {
                session,
                touched: now,
            },
        );
        Ok(())
    }

    fn fetch_at(
        &self,
        id: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<Option<DirectorySession>, SessionError> {
        let mut guard = self.guard()?;
        if self.evict_if_expired(&mut guard, id, now) {
            return Ok(None);
        }
        Ok(guard.get_mut(id).map(|stored| {
            stored.touched = now;
            stored.session.clone()
        }))
    }

    fn modify_at<T, E, F>(&self, id: &SessionId, now: DateTime<Utc>, change: F) -> Result<T, E>
    where
        F: FnOnce(&mut DirectorySession) -> Result<T, E>,
        E: From<SessionError>,
    {
        let mut guard = self.guard()?;
        self.evict_if_expired(&mut guard, id, now);
        let stored = guard.get_mut(id).ok_or(SessionError::NotFound)?;

        let mut draft = stored.session.clone();
        let outcome = change(&mut draft)?;
        stored.session = draft;
        stored.touched = now;
        Ok(outcome)
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, id: SessionId, session: DirectorySession) -> Result<(), SessionError> {
        self.insert_at(id, session, Utc::now())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<DirectorySession>, SessionError> {
        self.fetch_at(id, Utc::now())
    }

    fn modify<T, E, F>(&self, id: &SessionId, change: F) -> Result<T, E>
    where
        F: FnOnce(&mut DirectorySession) -> Result<T, E>,
        E: From<SessionError>,
    {
        self.modify_at(id, Utc::now(), change)
    }
}
