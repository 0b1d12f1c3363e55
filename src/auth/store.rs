//! Storage contracts consumed by the authentication services.

use async_trait::async_trait;
use thiserror::Error;

use crate::db::{Account, NewAccount};

/// Errors reported by the Credential Store and Session Store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique key already exists. Raised atomically by `insert_unique`.
    #[error("duplicate key")]
    DuplicateKey,

    /// The backing store could not complete the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateKey
            }
            _ => StoreError::Unavailable(e.to_string()),
        }
    }
}

/// Persistent account records keyed by username.
///
/// Implementations must be safe for concurrent use and must reject a
/// duplicate username inside `insert_unique` itself, not through a
/// preceding lookup.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an account by its exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Look up an account by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, StoreError>;

    /// Insert a new account, failing with [`StoreError::DuplicateKey`] if the
    /// username is taken.
    async fn insert_unique(&self, account: &NewAccount) -> Result<Account, StoreError>;

    /// Set the profile picture reference. Returns `false` if no such account.
    async fn update_profile_picture(&self, id: i64, reference: &str) -> Result<bool, StoreError>;
}
