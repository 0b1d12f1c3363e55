//! Input validation for account registration.

use thiserror::Error;

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Maximum password length in bytes.
///
/// There is no strength policy; the cap only bounds hashing work.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is too short.
    #[error("username must be at least {MIN_USERNAME_LENGTH} characters")]
    UsernameTooShort,

    /// Username is too long.
    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    /// Username contains invalid characters.
    #[error("username can only contain letters, numbers, underscores, and hyphens")]
    UsernameInvalidChars,

    /// Password is empty.
    #[error("password is required")]
    PasswordEmpty,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} bytes")]
    PasswordTooLong,
}

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Validate a username against `^[A-Za-z0-9_-]{3,20}$`.
///
/// # Examples
///
/// ```
/// use lorelib::auth::validation::validate_username;
///
/// assert!(validate_username("alice123").is_ok());
/// assert!(validate_username("bad un").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(is_username_char) {
        return Err(ValidationError::UsernameInvalidChars);
    }
    // All characters are ASCII at this point, so bytes == characters.
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooShort);
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }
    Ok(())
}

/// Validate a password before hashing.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordEmpty);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}
