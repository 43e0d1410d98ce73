//! Per-login application context.
//!
//! A [`Session`] owns the authenticated username, that user's loaded log,
//! and the view the client is on. Sessions live in a [`SessionRegistry`]
//! keyed by the id carried in the access token.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::models::health_log::HealthLog;
use crate::models::user::Username;

/// Which page the client is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    AddData,
    Insights,
    Settings,
}

#[derive(Debug)]
pub struct Session {
    pub username: Username,
    pub log: HealthLog,
    pub view: View,
    pub started_at: DateTime<Utc>,
    /// Matches the access token's `exp`
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: Username, log: HealthLog, ttl: Duration) -> Self {
        let started_at = Utc::now();
        Self {
            username,
            log,
            view: View::default(),
            started_at,
            expires_at: started_at + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            username: self.username.clone(),
            view: self.view,
            entries: self.log.len(),
            started_at: self.started_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub username: Username,
    pub view: View,
    pub entries: usize,
    pub started_at: DateTime<Utc>,
}

/// Shared handle to one session. Holding the lock serializes a request's
/// read-modify-save sequence against other requests on the same session.
pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session and return its id.
    pub async fn open(&self, session: Session) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        (id, handle)
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Returns false when the session was already gone.
    pub async fn close(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions whose token has expired. Returns how many were removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let handles: Vec<(Uuid, SessionHandle)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, handle)| (*id, handle.clone()))
            .collect();

        let mut expired = Vec::new();
        for (id, handle) in handles {
            if handle.lock().await.is_expired(now) {
                expired.push(id);
            }
        }

        let mut sessions = self.sessions.write().await;
        for id in &expired {
            sessions.remove(id);
        }
        expired.len()
    }
}

/// Periodically evict sessions whose token can no longer be used.
pub fn spawn_session_reaper(registry: SessionRegistry) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(StdDuration::from_secs(300));
        loop {
            interval.tick().await;
            let purged = registry.purge_expired(Utc::now()).await;
            if purged > 0 {
                let live = registry.len().await;
                tracing::debug!(purged, live, "Expired sessions purged");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(name: &str) -> Session {
        session_for(name, Duration::hours(1))
    }

    fn session_for(name: &str, ttl: Duration) -> Session {
        Session::new(Username::parse(name).unwrap(), HealthLog::default(), ttl)
    }

    #[test]
    fn test_new_session_starts_on_dashboard() {
        let s = session("alice");
        assert_eq!(s.view, View::Dashboard);
        assert_eq!(s.summary().entries, 0);
    }

    #[test]
    fn test_view_wire_names() {
        assert_eq!(serde_json::to_value(View::AddData).unwrap(), "add_data");
        let parsed: View = serde_json::from_str("\"settings\"").unwrap();
        assert_eq!(parsed, View::Settings);
        assert!(serde_json::from_str::<View>("\"admin\"").is_err());
    }

    #[tokio::test]
    async fn test_open_get_close() {
        let registry = SessionRegistry::new();
        let (id, handle) = registry.open(session("alice")).await;

        let found = registry.get(id).await.unwrap();
        assert!(Arc::ptr_eq(&found, &handle));
        assert_eq!(registry.len().await, 1);

        assert!(registry.close(id).await);
        assert!(registry.get(id).await.is_none());
        assert!(!registry.close(id).await);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let registry = SessionRegistry::new();
        let (a, _) = registry.open(session("alice")).await;
        let (b, _) = registry.open(session("alice")).await;
        assert_ne!(a, b);

        registry.get(a).await.unwrap().lock().await.view = View::Insights;
        assert_eq!(registry.get(b).await.unwrap().lock().await.view, View::Dashboard);
    }

    #[tokio::test]
    async fn test_purge_drops_only_expired_sessions() {
        let registry = SessionRegistry::new();
        for _ in 0..50 {
            registry.open(session_for("alice", Duration::seconds(-120))).await;
        }
        let (live, _) = registry.open(session("bob")).await;
        assert_eq!(registry.len().await, 51);

        assert_eq!(registry.purge_expired(Utc::now()).await, 50);
        assert_eq!(registry.len().await, 1);
        assert!(registry.get(live).await.is_some());

        // Once its own ttl has passed the live session goes too
        let later = Utc::now() + Duration::hours(2);
        assert_eq!(registry.purge_expired(later).await, 1);
        assert_eq!(registry.len().await, 0);
    }
}
