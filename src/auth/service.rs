//! Registration, login, logout and the authorization gate.
//!
//! Every operation runs its steps strictly in order and returns a typed
//! [`AuthError`]; nothing here panics or retries.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::auth::password::{PasswordError, PasswordHasher};
use crate::auth::session::{IdentitySnapshot, Session, SessionId, SessionStore};
use crate::auth::store::{CredentialStore, StoreError};
use crate::auth::validation::{validate_password, validate_username, ValidationError};
use crate::db::{Account, NewAccount, Role};

/// Caller-facing error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input shape.
    Validation,
    /// Duplicate username.
    Conflict,
    /// Bad credentials or missing/expired session.
    Authentication,
    /// Store or hasher failure.
    Dependency,
}

/// Authentication service errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Username does not match the allowed pattern.
    #[error("invalid username: {0}")]
    InvalidUsername(ValidationError),

    /// Password is empty or too long.
    #[error("invalid password: {0}")]
    InvalidPassword(ValidationError),

    /// Unknown role, or a role the caller may not claim.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// Username already exists.
    #[error("username already taken")]
    UsernameTaken,

    /// Unknown username or wrong password. Deliberately undifferentiated.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No valid session, or the session's account no longer exists.
    #[error("unauthorized")]
    Unauthorized,

    /// A store could not complete the operation.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The password hasher failed.
    #[error("password hasher failure: {0}")]
    Hasher(String),
}

impl AuthError {
    /// The caller-facing category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidUsername(_)
            | AuthError::InvalidPassword(_)
            | AuthError::InvalidRole(_) => ErrorKind::Validation,
            AuthError::UsernameTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::Unauthorized => ErrorKind::Authentication,
            AuthError::StoreUnavailable(_) | AuthError::Hasher(_) => ErrorKind::Dependency,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateKey => AuthError::UsernameTaken,
            StoreError::Unavailable(msg) => AuthError::StoreUnavailable(msg),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Hasher(e.to_string())
    }
}

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username.
    pub username: String,
    /// Plaintext password; hashed before it goes anywhere.
    pub password: String,
    /// Requested role name. Defaults to `reader`.
    pub role: Option<String>,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: None,
        }
    }

    /// Set the requested role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// The newly created account.
    pub account: Account,
    /// The session opened for it.
    pub session: Session,
}

/// Identity admitted by the gate, re-derived from the Credential Store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Account id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Current role.
    pub role: Role,
}

/// Authentication and session lifecycle service.
///
/// Stores are injected; the service holds no global state.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
    hasher: PasswordHasher,
    session_ttl: Duration,
    allow_admin_registration: bool,
}

impl AuthService {
    /// Create a new service.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
        hasher: PasswordHasher,
        session_ttl: Duration,
    ) -> Self {
        Self {
            credentials,
            sessions,
            hasher,
            session_ttl,
            allow_admin_registration: false,
        }
    }

    /// Allow or forbid self-registration with the `admin` role.
    pub fn with_admin_registration(mut self, allow: bool) -> Self {
        self.allow_admin_registration = allow;
        self
    }

    /// The Credential Store.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// The Session Store.
    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Session lifetime.
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    fn resolve_role(&self, requested: Option<&str>) -> Result<Role, AuthError> {
        let role = match requested.map(str::trim).filter(|r| !r.is_empty()) {
            None => Role::Reader,
            Some(name) => name
                .parse::<Role>()
                .map_err(|_| AuthError::InvalidRole(name.to_string()))?,
        };
        if role == Role::Admin && !self.allow_admin_registration {
            return Err(AuthError::InvalidRole(role.to_string()));
        }
        Ok(role)
    }

    /// Register a new account and open a session for it.
    ///
    /// 1. Validates username, password and role
    /// 2. Checks the username is free (fast path; the store re-checks atomically)
    /// 3. Hashes the password
    /// 4. Inserts the account
    /// 5. Creates a session from the new account
    ///
    /// If step 5 fails the account stays valid; the caller can log in later.
    pub async fn register(&self, request: RegistrationRequest) -> Result<Registration, AuthError> {
        validate_username(&request.username).map_err(AuthError::InvalidUsername)?;
        validate_password(&request.password).map_err(AuthError::InvalidPassword)?;
        let role = self.resolve_role(request.role.as_deref())?;

        if self
            .credentials
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            debug!(username = %request.username, "Registration rejected: username taken");
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = self.hasher.hash_blocking(&request.password).await?;

        let new_account = NewAccount::new(&request.username, password_hash).with_role(role);
        let account = match self.credentials.insert_unique(&new_account).await {
            Ok(account) => account,
            Err(StoreError::DuplicateKey) => {
                debug!(username = %request.username, "Registration lost a uniqueness race");
                return Err(AuthError::UsernameTaken);
            }
            Err(e) => {
                error!(username = %request.username, error = %e, "Failed to persist account");
                return Err(e.into());
            }
        };

        info!(
            username = %account.username,
            user_id = account.id,
            role = %account.role,
            "New user registered"
        );

        let session = self
            .sessions
            .create(IdentitySnapshot::from(&account), self.session_ttl)
            .await
            .map_err(|e| {
                error!(user_id = account.id, error = %e, "Failed to create session after registration");
                AuthError::from(e)
            })?;

        Ok(Registration { account, session })
    }

    /// Verify credentials and open a session.
    ///
    /// An unknown username and a wrong password fail identically.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let account = self.credentials.find_by_username(username).await?;

        let Some(account) = account else {
            self.hasher.verify_decoy(password).await;
            warn!(username = %username, "Login failed: user not found");
            return Err(AuthError::InvalidCredentials);
        };

        match self
            .hasher
            .verify_blocking(password, &account.password_hash)
            .await
        {
            Ok(()) => {}
            Err(PasswordError::VerificationFailed) => {
                warn!(username = %username, "Login failed: wrong password");
                return Err(AuthError::InvalidCredentials);
            }
            Err(PasswordError::InvalidHash) => {
                error!(user_id = account.id, "Stored password hash is unreadable");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        }

        let session = self
            .sessions
            .create(IdentitySnapshot::from(&account), self.session_ttl)
            .await?;

        info!(
            username = %account.username,
            user_id = account.id,
            session = %session.id.short(),
            "Login successful"
        );

        Ok(session)
    }

    /// Destroy the session named by the cookie value, if any.
    ///
    /// Idempotent: a missing, malformed or already-destroyed session is not
    /// an error. Only a store failure is.
    pub async fn logout(&self, cookie: Option<&str>) -> Result<(), AuthError> {
        let Some(id) = cookie.and_then(SessionId::parse) else {
            debug!("Logout without a usable session cookie");
            return Ok(());
        };

        match self.sessions.destroy(&id).await {
            Ok(true) => {
                info!(session = %id.short(), "Session logged out");
                Ok(())
            }
            Ok(false) => {
                debug!(session = %id.short(), "Logout: session not found");
                Ok(())
            }
            Err(e) => {
                error!(session = %id.short(), error = %e, "Failed to destroy session");
                Err(e.into())
            }
        }
    }

    /// Resolve a session cookie into a verified identity.
    ///
    /// Unauthenticated → SessionExtracted → IdentityVerified → Admitted,
    /// with any failed step ending in `Unauthorized`. The account is always
    /// re-read so deleted or re-roled accounts take effect immediately. Store
    /// failures surface as `StoreUnavailable`, never as `Unauthorized`.
    pub async fn authorize(&self, cookie: Option<&str>) -> Result<Identity, AuthError> {
        let id = cookie
            .and_then(SessionId::parse)
            .ok_or(AuthError::Unauthorized)?;

        let session = self
            .sessions
            .read(&id)
            .await?
            .filter(|s| !s.is_expired())
            .ok_or(AuthError::Unauthorized)?;

        let account = self
            .credentials
            .find_by_id(session.identity.id)
            .await?
            .ok_or_else(|| {
                debug!(
                    session = %id.short(),
                    user_id = session.identity.id,
                    "Session refers to a missing account"
                );
                AuthError::Unauthorized
            })?;

        Ok(Identity {
            id: account.id,
            username: account.username,
            role: account.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::MemorySessionStore;
    use crate::db::{Database, UserRepository};
    use async_trait::async_trait;

    struct Harness {
        service: AuthService,
        repo: UserRepository,
        sessions: Arc<MemorySessionStore>,
    }

    async fn harness() -> Harness {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        let sessions = Arc::new(MemorySessionStore::new());
        let service = AuthService::new(
            Arc::new(repo.clone()),
            sessions.clone(),
            PasswordHasher::new(1024, 1, 1).unwrap(),
            Duration::from_secs(3600),
        );
        Harness {
            service,
            repo,
            sessions,
        }
    }

    /// Credential Store whose backend is down.
    struct BrokenCredentials;

    #[async_trait]
    impl CredentialStore for BrokenCredentials {
        async fn find_by_username(&self, _: &str) -> Result<Option<Account>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn find_by_id(&self, _: i64) -> Result<Option<Account>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn insert_unique(&self, _: &NewAccount) -> Result<Account, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn update_profile_picture(&self, _: i64, _: &str) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    /// Session Store that accepts nothing.
    struct BrokenSessions;

    #[async_trait]
    impl SessionStore for BrokenSessions {
        async fn create(&self, _: IdentitySnapshot, _: Duration) -> Result<Session, StoreError> {
            Err(StoreError::Unavailable("session store down".into()))
        }
        async fn read(&self, _: &SessionId) -> Result<Option<Session>, StoreError> {
            Err(StoreError::Unavailable("session store down".into()))
        }
        async fn destroy(&self, _: &SessionId) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("session store down".into()))
        }
        async fn purge_expired(&self) -> Result<usize, StoreError> {
            Err(StoreError::Unavailable("session store down".into()))
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let h = harness().await;
        let reg = h
            .service
            .register(RegistrationRequest::new("alice123", "Secret!1").with_role("reader"))
            .await
            .unwrap();

        assert_eq!(reg.account.username, "alice123");
        assert_eq!(reg.account.role, Role::Reader);
        assert_eq!(reg.session.identity.id, reg.account.id);
        assert_eq!(reg.session.identity.username, "alice123");
        assert!(h.sessions.read(&reg.session.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_register_stores_verifiable_hash() {
        let h = harness().await;
        h.service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap();

        let stored = h.repo.find_by_username("alice123").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "Secret!1");
        assert!(PasswordHasher::new(1024, 1, 1)
            .unwrap()
            .verify("Secret!1", &stored.password_hash)
            .is_ok());
    }

    #[tokio::test]
    async fn test_register_defaults_to_reader() {
        let h = harness().await;
        let reg = h
            .service
            .register(RegistrationRequest::new("bob_99", "pw"))
            .await
            .unwrap();
        assert_eq!(reg.account.role, Role::Reader);
    }

    #[tokio::test]
    async fn test_register_invalid_username() {
        let h = harness().await;
        let result = h
            .service
            .register(RegistrationRequest::new("bad un", "Secret!1"))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AuthError::InvalidUsername(_)));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(h.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn test_register_empty_password() {
        let h = harness().await;
        let result = h
            .service
            .register(RegistrationRequest::new("alice123", ""))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidPassword(_))));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let h = harness().await;
        h.service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap();

        let err = h
            .service
            .register(RegistrationRequest::new("alice123", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_concurrent_registration_admits_exactly_one() {
        let h = harness().await;
        let a = h.service.clone();
        let b = h.service.clone();

        let (r1, r2) = tokio::join!(
            a.register(RegistrationRequest::new("racer", "one")),
            b.register(RegistrationRequest::new("racer", "two")),
        );

        let successes = [&r1, &r2].iter().filter(|r| r.is_ok()).count();
        let conflicts = [&r1, &r2]
            .iter()
            .filter(|r| matches!(r, Err(AuthError::UsernameTaken)))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(conflicts, 1);
    }

    #[tokio::test]
    async fn test_register_admin_requires_opt_in() {
        let h = harness().await;
        let result = h
            .service
            .register(RegistrationRequest::new("root_user", "pw").with_role("admin"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidRole(_))));

        let service = h.service.clone().with_admin_registration(true);
        let reg = service
            .register(RegistrationRequest::new("root_user", "pw").with_role("admin"))
            .await
            .unwrap();
        assert_eq!(reg.account.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_register_unknown_role() {
        let h = harness().await;
        let result = h
            .service
            .register(RegistrationRequest::new("alice123", "pw").with_role("overlord"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidRole(_))));
    }

    #[tokio::test]
    async fn test_register_keeps_account_when_session_creation_fails() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        let service = AuthService::new(
            Arc::new(repo.clone()),
            Arc::new(BrokenSessions),
            PasswordHasher::new(1024, 1, 1).unwrap(),
            Duration::from_secs(3600),
        );

        let err = service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dependency);

        // The account exists and the username is now taken.
        assert!(repo.find_by_username("alice123").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_out_of_range_ttl_fails_without_panicking() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        let service = AuthService::new(
            Arc::new(repo.clone()),
            Arc::new(MemorySessionStore::new()),
            PasswordHasher::new(1024, 1, 1).unwrap(),
            Duration::from_secs(10_000_000_000_000),
        );

        let err = service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));

        let err = service.login("alice123", "Secret!1").await.unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_register_store_unavailable() {
        let service = AuthService::new(
            Arc::new(BrokenCredentials),
            Arc::new(MemorySessionStore::new()),
            PasswordHasher::new(1024, 1, 1).unwrap(),
            Duration::from_secs(3600),
        );
        let err = service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_login_success() {
        let h = harness().await;
        h.service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap();

        let session = h.service.login("alice123", "Secret!1").await.unwrap();
        assert_eq!(session.identity.username, "alice123");
        assert!(h.sessions.read(&session.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let h = harness().await;
        h.service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap();

        let wrong_password = h.service.login("alice123", "wrong").await.unwrap_err();
        let unknown_user = h.service.login("nobody", "Secret!1").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_login_store_unavailable() {
        let service = AuthService::new(
            Arc::new(BrokenCredentials),
            Arc::new(MemorySessionStore::new()),
            PasswordHasher::new(1024, 1, 1).unwrap(),
            Duration::from_secs(3600),
        );
        let err = service.login("alice123", "Secret!1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dependency);
    }

    #[tokio::test]
    async fn test_authorize_admits_live_session() {
        let h = harness().await;
        let reg = h
            .service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap();

        let identity = h
            .service
            .authorize(Some(reg.session.id.as_str()))
            .await
            .unwrap();
        assert_eq!(identity.id, reg.account.id);
        assert_eq!(identity.username, "alice123");
        assert_eq!(identity.role, Role::Reader);
    }

    #[tokio::test]
    async fn test_authorize_rejects_missing_and_malformed_cookie() {
        let h = harness().await;
        assert!(matches!(
            h.service.authorize(None).await,
            Err(AuthError::Unauthorized)
        ));
        assert!(matches!(
            h.service.authorize(Some("garbage")).await,
            Err(AuthError::Unauthorized)
        ));
        let unknown = SessionId::generate();
        assert!(matches!(
            h.service.authorize(Some(unknown.as_str())).await,
            Err(AuthError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_authorize_rejects_expired_session() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        let service = AuthService::new(
            Arc::new(repo),
            Arc::new(MemorySessionStore::new()),
            PasswordHasher::new(1024, 1, 1).unwrap(),
            Duration::ZERO,
        );
        let reg = service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap();

        assert!(matches!(
            service.authorize(Some(reg.session.id.as_str())).await,
            Err(AuthError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_authorize_rejects_deleted_account() {
        let h = harness().await;
        let reg = h
            .service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap();

        h.repo.delete(reg.account.id).await.unwrap();

        assert!(matches!(
            h.service.authorize(Some(reg.session.id.as_str())).await,
            Err(AuthError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_authorize_uses_current_role() {
        let h = harness().await;
        let reg = h
            .service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap();

        h.repo.update_role(reg.account.id, Role::Admin).await.unwrap();

        let identity = h
            .service
            .authorize(Some(reg.session.id.as_str()))
            .await
            .unwrap();
        assert_eq!(identity.role, Role::Admin);
        // The snapshot itself is untouched.
        let session = h.sessions.read(&reg.session.id).await.unwrap().unwrap();
        assert_eq!(session.identity.role, Role::Reader);
    }

    #[tokio::test]
    async fn test_authorize_store_failure_is_not_unauthorized() {
        let service = AuthService::new(
            Arc::new(BrokenCredentials),
            Arc::new(BrokenSessions),
            PasswordHasher::new(1024, 1, 1).unwrap(),
            Duration::from_secs(3600),
        );
        let id = SessionId::generate();
        let err = service.authorize(Some(id.as_str())).await.unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_logout_then_authorize_fails() {
        let h = harness().await;
        let reg = h
            .service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap();
        let cookie = reg.session.id.as_str().to_string();

        h.service.logout(Some(&cookie)).await.unwrap();
        assert!(matches!(
            h.service.authorize(Some(&cookie)).await,
            Err(AuthError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let h = harness().await;
        let reg = h
            .service
            .register(RegistrationRequest::new("alice123", "Secret!1"))
            .await
            .unwrap();
        let cookie = reg.session.id.as_str().to_string();

        assert!(h.service.logout(Some(&cookie)).await.is_ok());
        assert!(h.service.logout(Some(&cookie)).await.is_ok());
        assert!(h.service.logout(None).await.is_ok());
        assert!(h.service.logout(Some("garbage")).await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_store_failure() {
        let service = AuthService::new(
            Arc::new(BrokenCredentials),
            Arc::new(BrokenSessions),
            PasswordHasher::new(1024, 1, 1).unwrap(),
            Duration::from_secs(3600),
        );
        let id = SessionId::generate();
        let err = service.logout(Some(id.as_str())).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dependency);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(AuthError::UsernameTaken.kind(), ErrorKind::Conflict);
        assert_eq!(
            AuthError::InvalidCredentials.kind(),
            ErrorKind::Authentication
        );
        assert_eq!(AuthError::Unauthorized.kind(), ErrorKind::Authentication);
        assert_eq!(
            AuthError::Hasher("boom".into()).kind(),
            ErrorKind::Dependency
        );
        assert_eq!(
            AuthError::from(StoreError::DuplicateKey).kind(),
            ErrorKind::Conflict
        );
    }
}
