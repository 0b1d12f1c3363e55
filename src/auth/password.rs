//! Password hashing for LoreLibrary.
//!
//! Uses Argon2id with a per-hash random salt. The cost parameters are
//! configurable; verification always uses the parameters embedded in the
//! stored PHC string, so raising the cost does not invalidate old hashes.

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;
use thiserror::Error;

use crate::config::SecurityConfig;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Argon2 parameters were rejected.
    #[error("invalid hasher parameters: {0}")]
    InvalidParams(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

/// Fixed input for the decoy hash used when the account does not exist.
const DUMMY_PASSWORD: &str = "lorelib-dummy-password";

/// Argon2id password hasher with configurable cost.
///
/// Cloning is cheap; the decoy hash is shared.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    dummy_hash: Arc<str>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

impl PasswordHasher {
    /// Create a hasher with the given memory cost (KiB), iterations and parallelism.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        let mut hasher = Self {
            params,
            dummy_hash: Arc::from(""),
        };
        hasher.dummy_hash = Arc::from(hasher.hash(DUMMY_PASSWORD)?);
        Ok(hasher)
    }

    /// Create a hasher from the security configuration.
    pub fn from_config(config: &SecurityConfig) -> Result<Self, PasswordError> {
        Self::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
        )
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password.
    ///
    /// Returns a PHC-formatted hash string that includes the salt and parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorelib::auth::PasswordHasher;
    ///
    /// let hasher = PasswordHasher::new(1024, 1, 1).unwrap();
    /// let hash = hasher.hash("Secret!1").unwrap();
    /// assert!(hash.starts_with("$argon2id$"));
    /// assert!(hasher.verify("Secret!1", &hash).is_ok());
    /// ```
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

        // Parameters come from the parsed hash, not from self.params.
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| PasswordError::VerificationFailed)
    }

    /// Hash a password on the blocking thread pool.
    pub async fn hash_blocking(&self, password: &str) -> Result<String, PasswordError> {
        let hasher = self.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PasswordError::HashError(e.to_string()))?
    }

    /// Verify a password on the blocking thread pool.
    pub async fn verify_blocking(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let hasher = self.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| PasswordError::HashError(e.to_string()))?
    }

    /// Spend the same work as a real verification, against a decoy hash.
    ///
    /// Used when the account does not exist so that response timing does not
    /// reveal whether a username is registered. The outcome is discarded.
    pub async fn verify_decoy(&self, password: &str) {
        let dummy = Arc::clone(&self.dummy_hash);
        let _ = self.verify_blocking(password, &dummy).await;
    }
}
