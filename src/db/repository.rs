//! Account repository for LoreLibrary.
//!
//! Implements the Credential Store on top of the `users` table. Username
//! uniqueness is enforced by the table's UNIQUE constraint, so concurrent
//! inserts of the same name cannot both succeed.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::user::{Account, NewAccount, Role};
use crate::auth::{CredentialStore, StoreError};

const ACCOUNT_COLUMNS: &str = "id, username, password_hash, role, profile_picture, created_at";

/// Repository for account records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new UserRepository sharing the given pool.
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Change an account's role. Returns `false` if no such account.
    pub async fn update_role(&self, id: i64, role: Role) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an account. Returns `false` if no such account.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count registered accounts.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn insert_unique(&self, account: &NewAccount) -> Result<Account, StoreError> {
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, role, profile_picture, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(&account.profile_picture)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::Unavailable(format!("account {id} vanished after insert")))
    }

    async fn update_profile_picture(&self, id: i64, reference: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE users SET profile_picture = ? WHERE id = ?")
            .bind(reference)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
