//! SQLite-backed Session Store.
//!
//! Sessions survive restarts and are shared by every process pointed at the
//! same database file. Timestamps are stored as unix seconds so expiry can be
//! filtered in SQL.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use super::user::Role;
use crate::auth::{IdentitySnapshot, Session, SessionId, SessionStore, StoreError};

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: String,
    user_id: i64,
    username: String,
    #[sqlx(try_from = "String")]
    role: Role,
    profile_picture: Option<String>,
    created_at: i64,
    expires_at: i64,
}

impl SessionRow {
    fn into_session(self) -> Option<Session> {
        Some(Session {
            id: SessionId::parse(&self.id)?,
            identity: IdentitySnapshot {
                id: self.user_id,
                username: self.username,
                role: self.role,
                profile_picture: self.profile_picture,
            },
            created_at: DateTime::from_timestamp(self.created_at, 0)?,
            expires_at: DateTime::from_timestamp(self.expires_at, 0)?,
        })
    }
}

/// Session Store persisted in the `sessions` table.
#[derive(Debug, Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    /// Create a store sharing the given pool.
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Count stored rows, including expired ones not yet purged.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create(
        &self,
        identity: IdentitySnapshot,
        ttl: Duration,
    ) -> Result<Session, StoreError> {
        let session = Session::new(identity, ttl)?;

        sqlx::query(
            "INSERT INTO sessions (id, user_id, username, role, profile_picture, created_at, expires_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(session.id.as_str())
        .bind(session.identity.id)
        .bind(&session.identity.username)
        .bind(session.identity.role.as_str())
        .bind(&session.identity.profile_picture)
        .bind(session.created_at.timestamp())
        .bind(session.expires_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(session)
    }

    async fn read(&self, id: &SessionId) -> Result<Option<Session>, StoreError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT id, user_id, username, role, profile_picture, created_at, expires_at
             FROM sessions WHERE id = ? AND expires_at > ?",
        )
        .bind(id.as_str())
        .bind(Utc::now().timestamp())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(SessionRow::into_session))
    }

    async fn destroy(&self, id: &SessionId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self) -> Result<usize, StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() as usize;
        if removed > 0 {
            debug!(removed, "Purged expired sessions");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn identity() -> IdentitySnapshot {
        IdentitySnapshot {
            id: 42,
            username: "alice123".to_string(),
            role: Role::Admin,
            profile_picture: Some("uploads/alice.png".to_string()),
        }
    }

    async fn setup() -> (Database, SqliteSessionStore) {
        let db = Database::open_in_memory().await.unwrap();
        let store = SqliteSessionStore::new(db.pool());
        (db, store)
    }

    #[tokio::test]
    async fn test_create_and_read() {
        let (_db, store) = setup().await;
        let session = store
            .create(identity(), Duration::from_secs(3600))
            .await
            .unwrap();

        let read = store.read(&session.id).await.unwrap().unwrap();
        assert_eq!(read.id, session.id);
        assert_eq!(read.identity, identity());
        assert_eq!(read.expires_at.timestamp(), session.expires_at.timestamp());
    }

    #[tokio::test]
    async fn test_read_unknown_session() {
        let (_db, store) = setup().await;
        assert!(store.read(&SessionId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_not_returned() {
        let (_db, store) = setup().await;
        let session = store.create(identity(), Duration::ZERO).await.unwrap();

        assert!(store.read(&session.id).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_destroy() {
        let (_db, store) = setup().await;
        let session = store
            .create(identity(), Duration::from_secs(60))
            .await
            .unwrap();

        assert!(store.destroy(&session.id).await.unwrap());
        assert!(store.read(&session.id).await.unwrap().is_none());
        assert!(!store.destroy(&session.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let (_db, store) = setup().await;
        store.create(identity(), Duration::ZERO).await.unwrap();
        let live = store
            .create(identity(), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.read(&live.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sessions_survive_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("sessions.db");

        let db = Database::open(&path).await.unwrap();
        let session = SqliteSessionStore::new(db.pool())
            .create(identity(), Duration::from_secs(60))
            .await
            .unwrap();
        db.close().await;

        let db = Database::open(&path).await.unwrap();
        let store = SqliteSessionStore::new(db.pool());
        assert!(store.read(&session.id).await.unwrap().is_some());
    }
}
