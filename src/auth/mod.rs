//! Authentication module for LoreLibrary.
//!
//! This module provides password hashing, the session model and stores,
//! the storage contracts and the authentication service built on them.

mod password;
mod service;
mod session;
mod store;
pub mod validation;

pub use password::{PasswordError, PasswordHasher};
pub use service::{
    AuthError, AuthService, ErrorKind, Identity, Registration, RegistrationRequest,
};
pub use session::{
    IdentitySnapshot, MemorySessionStore, Session, SessionId, SessionStore, SESSION_ID_LENGTH,
};
pub use store::{CredentialStore, StoreError};
pub use validation::{validate_password, validate_username, ValidationError};
