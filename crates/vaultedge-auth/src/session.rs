//! In-memory session store.
//!
//! Sessions are keyed by a random UUID v4 and expire a fixed time after
//! creation. Nothing is persisted; a restart logs everyone out.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::{AuthError, SessionResolver, SessionUser};

/// Upper bound on a session's lifetime (400 days).
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(400 * 24 * 60 * 60);

struct Entry {
    user: SessionUser,
    expires_at: Instant,
}

/// Shared session map. Cheap to clone.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions live for `ttl`, capped at
    /// [`MAX_SESSION_TTL`].
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: ttl.min(MAX_SESSION_TTL),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session for `user` and return its id.
    pub fn create(&self, user: SessionUser) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        log::debug!("Session created for '{}'", user.username);
        let now = Instant::now();
        let expires_at = now
            .checked_add(self.ttl)
            .or_else(|| now.checked_add(MAX_SESSION_TTL))
            .unwrap_or(now);
        let entry = Entry { user, expires_at };
        self.write().insert(id.clone(), entry);
        id
    }

    /// Look up a live session. Expired entries are removed on access.
    pub fn get(&self, id: &str) -> Result<SessionUser, AuthError> {
        {
            let sessions = self.read();
            match sessions.get(id) {
                None => return Err(AuthError::UnknownSession),
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(entry.user.clone());
                }
                Some(_) => {}
            }
        }

        self.write().remove(id);
        Err(AuthError::Expired)
    }

    /// End a session. Returns `true` if it existed.
    pub fn destroy(&self, id: &str) -> bool {
        let removed = self.write().remove(id);
        if let Some(entry) = &removed {
            log::debug!("Session destroyed for '{}'", entry.user.username);
        }
        removed.is_some()
    }

    /// Drop every expired session; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.sessions.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.sessions.write().unwrap_or_else(|p| p.into_inner())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionResolver for SessionStore {
    fn resolve(
        &self,
        session_id: &str,
    ) -> Pin<Box<dyn Future<Output = Result<SessionUser, AuthError>> + Send + '_>> {
        Box::pin(std::future::ready(self.get(session_id)))
    }
}
