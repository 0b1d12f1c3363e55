//! LoreLibrary - session-authenticated backend for a manga-tracking site.
//!
//! Accounts register and log in over a JSON API; a server-side session,
//! referenced by an opaque cookie, authorizes every protected route.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    AuthError, AuthService, CredentialStore, Identity, MemorySessionStore, PasswordHasher,
    RegistrationRequest, Session, SessionId, SessionStore, StoreError,
};
pub use config::Config;
pub use db::{Account, Database, NewAccount, Role, SqliteSessionStore, UserRepository};
pub use error::{LoreError, Result};
pub use web::WebServer;
