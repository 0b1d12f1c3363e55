//! API handlers and the state they share.

pub mod auth;
pub mod user;

pub use auth::*;
pub use user::*;

use std::sync::Arc;

use crate::auth::{AuthService, MemorySessionStore, PasswordHasher, SessionStore};
use crate::config::{Config, SessionBackend};
use crate::db::{Database, SqliteSessionStore, UserRepository};
use crate::web::cookie::SessionCookie;
use crate::{LoreError, Result};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle for the profile and library repositories.
    pub db: Database,
    /// Authentication service.
    pub auth: Arc<AuthService>,
    /// Session cookie settings.
    pub cookies: SessionCookie,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, auth: AuthService, cookies: SessionCookie) -> Self {
        Self {
            db,
            auth: Arc::new(auth),
            cookies,
        }
    }

    /// Wire the stores, hasher and cookie settings from configuration.
    pub fn from_config(db: Database, config: &Config) -> Result<Self> {
        let hasher = PasswordHasher::from_config(&config.security)
            .map_err(|e| LoreError::Config(e.to_string()))?;

        let sessions: Arc<dyn SessionStore> = match config.session.store {
            SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
            SessionBackend::Sqlite => Arc::new(SqliteSessionStore::new(db.pool())),
        };

        let auth = AuthService::new(
            Arc::new(UserRepository::new(db.pool())),
            sessions,
            hasher,
            config.session.ttl(),
        )
        .with_admin_registration(config.security.allow_admin_registration);

        let cookies = SessionCookie::new(&config.session, config.server.environment);

        Ok(Self::new(db, auth, cookies))
    }
}
