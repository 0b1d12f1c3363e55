//! Request DTOs for the web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};

/// Registration request.
///
/// Username and password rules are enforced by the authentication service so
/// that every entry point reports the same errors.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Requested role (`reader` if omitted).
    #[serde(default)]
    pub role: Option<String>,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Profile picture update.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePictureRequest {
    /// Reference to already-stored media.
    #[validate(
        length(min = 1, max = 512, message = "Profile picture must be 1-512 characters"),
        custom(function = "no_control_chars")
    )]
    pub profile_picture: String,
}

/// New profile comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Comment body.
    #[validate(
        length(min = 1, max = 500, message = "Comment must be 1-500 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub content: String,
}
