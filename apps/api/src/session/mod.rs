//! In-memory session store.
//!
//! One `Session` per browser session, keyed by id. Handlers take a snapshot,
//! drop the lock, do their slow work (LLM, PDF) and write the result back with
//! `update`. The lock is never held across an `.await` on anything else.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::session::Session;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Creates an empty session. Sessions idle past the TTL are dropped first.
    pub async fn create(&self) -> Session {
        let now = Utc::now();
        self.evict_idle(now).await;

        let session = Session::new(Uuid::new_v4(), now);
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session.clone());
        info!(session_id = %session.id, active = sessions.len(), "session created");
        session
    }

    /// Clones the current state of a session and marks it active.
    pub async fn snapshot(&self, id: Uuid) -> Result<Session, AppError> {
        self.update(id, |session| session.clone()).await
    }

    /// Applies `f` to the session under the write lock and marks it active.
    pub async fn update<F, R>(&self, id: Uuid, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.last_active_at = Utc::now();
        Ok(f(session))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let removed = self.sessions.write().await.remove(&id);
        match removed {
            Some(_) => {
                info!(session_id = %id, "session discarded");
                Ok(())
            }
            None => Err(not_found(id)),
        }
    }

    /// Drops every session whose last activity is older than the idle TTL.
    /// Returns how many were removed.
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - self.idle_ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_active_at >= cutoff);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "evicted idle sessions");
        }
        evicted
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
