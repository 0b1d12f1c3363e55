//! Account model for LoreLibrary.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular reader.
    #[default]
    Reader,
    /// Site administrator.
    Admin,
}

impl Role {
    /// Convert role to its database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reader" => Ok(Role::Reader),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    /// Unique account id.
    pub id: i64,
    /// Login username (unique, case-sensitive).
    pub username: String,
    /// Argon2id PHC hash. Never the plaintext.
    pub password_hash: String,
    /// Account role.
    #[sqlx(try_from = "String")]
    pub role: Role,
    /// Profile picture reference.
    pub profile_picture: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Login username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Role (defaults to Reader).
    pub role: Role,
    /// Initial profile picture reference.
    pub profile_picture: Option<String>,
}

impl NewAccount {
    /// Create a reader account with no profile picture.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            role: Role::default(),
            profile_picture: None,
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the profile picture reference.
    pub fn with_profile_picture(mut self, reference: impl Into<String>) -> Self {
        self.profile_picture = Some(reference.into());
        self
    }
}
