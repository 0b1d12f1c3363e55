//! Error types for LoreLibrary.

use thiserror::Error;

/// Common error type for LoreLibrary.
#[derive(Error, Debug)]
pub enum LoreError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for LoreError {
    fn from(e: sqlx::Error) -> Self {
        LoreError::Database(e.to_string())
    }
}

/// Result type alias for LoreLibrary operations.
pub type Result<T> = std::result::Result<T, LoreError>;
