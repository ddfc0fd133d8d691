use std::collections::HashMap;

use deadpool_redis::Pool as RedisPool;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Session, PROFILE_FIELD_COUNT};

/// Session store. The in-memory map is authoritative; Redis holds
/// best-effort snapshots so a restarted process can restore live sessions.
/// Writes are last-write-wins per session id.
pub struct SessionRepository {
    sessions: RwLock<HashMap<Uuid, Session>>,
    redis: Option<RedisPool>,
    ttl_hours: i64,
}

impl SessionRepository {
    pub fn new(redis: Option<RedisPool>, ttl_hours: i64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            redis,
            ttl_hours,
        }
    }

    /// Insert or replace a session, then snapshot it.
    pub async fn save(&self, session: Session) {
        self.snapshot(&session).await;
        self.sessions.write().await.insert(session.id, session);
    }

    /// Look up a session, falling back to a Redis snapshot when the
    /// in-memory record is gone. Expired sessions are dropped on access.
    pub async fn find(&self, id: Uuid) -> Option<Session> {
        if let Some(session) = self.sessions.read().await.get(&id).cloned() {
            if session.is_expired(self.ttl_hours) {
                self.delete(id).await;
                return None;
            }
            return Some(session);
        }

        let restored = self.restore(id).await?;
        self.sessions.write().await.insert(id, restored.clone());
        Some(restored)
    }

    /// Remove a session and its snapshot.
    pub async fn delete(&self, id: Uuid) {
        self.sessions.write().await.remove(&id);

        if let Some(pool) = &self.redis {
            match pool.get().await {
                Ok(mut conn) => {
                    if let Err(e) = conn.del::<_, ()>(snapshot_key(id)).await {
                        warn!("Failed to delete session snapshot {}: {}", id, e);
                    }
                }
                Err(e) => warn!("Redis unavailable while deleting snapshot: {}", e),
            }
        }
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn snapshot(&self, session: &Session) {
        let Some(pool) = &self.redis else {
            return;
        };

        let payload = match serde_json::to_string(session) {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to serialize session {}: {}", session.id, e);
                return;
            }
        };

        match pool.get().await {
            Ok(mut conn) => {
                let ttl_secs = (self.ttl_hours * 3600).max(60) as u64;
                if let Err(e) = conn
                    .set_ex::<_, _, ()>(snapshot_key(session.id), payload, ttl_secs)
                    .await
                {
                    warn!("Failed to snapshot session {}: {}", session.id, e);
                }
            }
            Err(e) => warn!("Redis unavailable while snapshotting: {}", e),
        }
    }

    async fn restore(&self, id: Uuid) -> Option<Session> {
        let pool = self.redis.as_ref()?;

        let mut conn = match pool.get().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Redis unavailable while restoring session {}: {}", id, e);
                return None;
            }
        };

        let payload: Option<String> = match conn.get(snapshot_key(id)).await {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to read session snapshot {}: {}", id, e);
                return None;
            }
        };

        let session: Session = match serde_json::from_str(&payload?) {
            Ok(s) => s,
            Err(e) => {
                warn!("Discarding unreadable session snapshot {}: {}", id, e);
                return None;
            }
        };

        // Snapshots written by an incompatible profile layout are discarded
        if session.field_index >= PROFILE_FIELD_COUNT {
            warn!("Discarding incompatible session snapshot {}", id);
            self.delete(id).await;
            return None;
        }

        if session.is_expired(self.ttl_hours) {
            debug!("Discarding expired session snapshot {}", id);
            self.delete(id).await;
            return None;
        }

        Some(session)
    }
}

fn snapshot_key(id: Uuid) -> String {
    format!("esg_session:{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn save_and_find_round_trip() {
        let repo = SessionRepository::new(None, 24);
        let session = Session::new();
        let id = session.id;

        repo.save(session).await;

        let found = repo.find(id).await.expect("session exists");
        assert_eq!(found.id, id);
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn missing_session_is_none() {
        let repo = SessionRepository::new(None, 24);
        assert!(repo.find(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn save_is_last_write_wins() {
        let repo = SessionRepository::new(None, 24);
        let mut session = Session::new();
        let id = session.id;
        repo.save(session.clone()).await;

        session.profile.name = Some("Ana".to_string());
        repo.save(session).await;

        let found = repo.find(id).await.unwrap();
        assert_eq!(found.profile.name.as_deref(), Some("Ana"));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn expired_sessions_are_dropped_on_access() {
        let repo = SessionRepository::new(None, 24);
        let mut session = Session::new();
        let id = session.id;
        session.updated_at = Utc::now() - Duration::hours(30);
        repo.save(session).await;

        assert!(repo.find(id).await.is_none());
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn delete_removes_session() {
        let repo = SessionRepository::new(None, 24);
        let session = Session::new();
        let id = session.id;
        repo.save(session).await;

        repo.delete(id).await;
        assert!(repo.find(id).await.is_none());
    }
}
