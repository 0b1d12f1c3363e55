//! Session model and the in-memory Session Store.
//!
//! A session is created by a successful registration or login, carries a
//! snapshot of the account taken at that moment, and lives for a fixed TTL
//! measured from creation. There is no sliding expiry.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};
use tokio::sync::RwLock;
use tracing::debug;

use crate::auth::store::StoreError;
use crate::db::{Account, Role};

/// Number of random bytes in a session id.
const SESSION_ID_BYTES: usize = 32;

/// Encoded length of a session id (base64url, no padding).
pub const SESSION_ID_LENGTH: usize = 43;

/// Opaque session identifier held by the client in a cookie.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new id from the OS random number generator.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Parse a client-supplied value.
    ///
    /// Returns `None` for anything that could not have been produced by
    /// [`SessionId::generate`].
    pub fn parse(value: &str) -> Option<Self> {
        let well_formed = value.len() == SESSION_ID_LENGTH
            && value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        well_formed.then(|| Self(value.to_string()))
    }

    /// The full id, for cookies and storage.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for log lines.
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl std::fmt::Debug for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionId({}…)", self.short())
    }
}

/// The part of an account cached in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySnapshot {
    /// Account id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Role at the time the session was created.
    pub role: Role,
    /// Profile picture reference at the time the session was created.
    pub profile_picture: Option<String>,
}

impl From<&Account> for IdentitySnapshot {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            role: account.role,
            profile_picture: account.profile_picture.clone(),
        }
    }
}

/// A server-side session record.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session id.
    pub id: SessionId,
    /// Account snapshot captured at creation.
    pub identity: IdentitySnapshot,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a fresh session with a new random id.
    ///
    /// Fails if `ttl` pushes the expiry past what a timestamp can represent.
    pub fn new(identity: IdentitySnapshot, ttl: Duration) -> Result<Self, StoreError> {
        let now = Utc::now();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                StoreError::Unavailable(format!(
                    "session lifetime of {}s is out of range",
                    ttl.as_secs()
                ))
            })?;

        Ok(Self {
            id: SessionId::generate(),
            identity,
            created_at: now,
            expires_at,
        })
    }

    /// Check if the session has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check expiry against a given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Process-wide store of sessions keyed by [`SessionId`].
///
/// Implementations provide their own concurrency safety. `read` must not
/// return expired sessions and must not mutate anything.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session for the identity, valid for `ttl` from now.
    async fn create(&self, identity: IdentitySnapshot, ttl: Duration)
        -> Result<Session, StoreError>;

    /// Read a live session.
    async fn read(&self, id: &SessionId) -> Result<Option<Session>, StoreError>;

    /// Destroy a session. Returns `true` if a session was removed.
    async fn destroy(&self, id: &SessionId) -> Result<bool, StoreError>;

    /// Remove expired sessions, returning how many were removed.
    async fn purge_expired(&self) -> Result<usize, StoreError>;
}

/// Session Store kept in process memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(
        &self,
        identity: IdentitySnapshot,
        ttl: Duration,
    ) -> Result<Session, StoreError> {
        let session = Session::new(identity, ttl)?;
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn read(&self, id: &SessionId) -> Result<Option<Session>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).filter(|s| !s.is_expired()).cloned())
    }

    async fn destroy(&self, id: &SessionId) -> Result<bool, StoreError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn purge_expired(&self) -> Result<usize, StoreError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));

        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed = removed, "Purged expired in-memory sessions");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(id: i64) -> IdentitySnapshot {
        IdentitySnapshot {
            id,
            username: format!("user{id}"),
            role: Role::Reader,
            profile_picture: None,
        }
    }

    #[test]
    fn test_session_id_shape() {
        let id = SessionId::generate();
        assert_eq!(id.as_str().len(), SESSION_ID_LENGTH);
        assert!(SessionId::parse(id.as_str()).is_some());
    }

    #[test]
    fn test_session_id_uniqueness() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_session_id_parse_rejects_malformed() {
        assert!(SessionId::parse("").is_none());
        assert!(SessionId::parse("short").is_none());
        assert!(SessionId::parse(&"a".repeat(44)).is_none());
        assert!(SessionId::parse(&format!("{}!", "a".repeat(42))).is_none());
        assert!(SessionId::parse(&format!("{}=", "a".repeat(42))).is_none());
        assert!(SessionId::parse(&"a".repeat(43)).is_some());
    }

    #[test]
    fn test_session_id_debug_is_redacted() {
        let id = SessionId::generate();
        let debug = format!("{id:?}");
        assert!(!debug.contains(id.as_str()));
        assert!(debug.contains(id.short()));
    }

    #[test]
    fn test_session_expiry() {
        let session = Session::new(identity(1), Duration::from_secs(3600)).unwrap();
        assert!(!session.is_expired());
        assert!(session.is_expired_at(session.expires_at));
        assert!(session.is_expired_at(session.created_at + chrono::Duration::hours(2)));
    }

    #[test]
    fn test_session_rejects_out_of_range_ttl() {
        // Representable as a chrono::Duration but overflows the expiry instant
        let result = Session::new(identity(1), Duration::from_secs(10_000_000_000_000));
        assert!(matches!(result, Err(StoreError::Unavailable(_))));

        // Not representable as a chrono::Duration at all
        let result = Session::new(identity(1), Duration::from_secs(u64::MAX / 2));
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_memory_store_create_with_out_of_range_ttl() {
        let store = MemorySessionStore::new();
        let result = store
            .create(identity(1), Duration::from_secs(u64::MAX / 2))
            .await;

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert!(store.is_empty().await);
    }

    #[test]
    fn test_identity_from_account() {
        let account = Account {
            id: 7,
            username: "alice123".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: Role::Admin,
            profile_picture: Some("uploads/a.png".to_string()),
            created_at: Utc::now(),
        };
        let snapshot = IdentitySnapshot::from(&account);
        assert_eq!(snapshot.id, 7);
        assert_eq!(snapshot.username, "alice123");
        assert_eq!(snapshot.role, Role::Admin);
        assert_eq!(snapshot.profile_picture.as_deref(), Some("uploads/a.png"));
    }

    #[tokio::test]
    async fn test_memory_store_create_read_destroy() {
        let store = MemorySessionStore::new();
        let session = store
            .create(identity(1), Duration::from_secs(60))
            .await
            .unwrap();

        let read = store.read(&session.id).await.unwrap().unwrap();
        assert_eq!(read.identity, identity(1));

        assert!(store.destroy(&session.id).await.unwrap());
        assert!(store.read(&session.id).await.unwrap().is_none());
        // Already gone
        assert!(!store.destroy(&session.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_store_hides_expired_sessions() {
        let store = MemorySessionStore::new();
        let session = store.create(identity(1), Duration::ZERO).await.unwrap();

        assert!(store.read(&session.id).await.unwrap().is_none());
        // Reading does not remove it
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_purge_expired() {
        let store = MemorySessionStore::new();
        store.create(identity(1), Duration::ZERO).await.unwrap();
        store.create(identity(2), Duration::ZERO).await.unwrap();
        let live = store
            .create(identity(3), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(store.purge_expired().await.unwrap(), 2);
        assert_eq!(store.len().await, 1);
        assert!(store.read(&live.id).await.unwrap().is_some());
    }
}
