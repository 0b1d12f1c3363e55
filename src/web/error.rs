//! API error handling for the LoreLibrary web API.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::{AuthError, ErrorKind};
use crate::LoreError;

/// Message for a rejected username.
pub const INVALID_USERNAME_MESSAGE: &str = "Invalid username. Username must be 3-20 characters long and can only contain letters, numbers, underscores, and hyphens.";

/// Message for a duplicate username.
pub const USERNAME_TAKEN_MESSAGE: &str = "Username already taken";

/// Message for any failed login. Never says which part was wrong.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect username or password";

/// Message for requests the gate turns away.
pub const UNAUTHORIZED_MESSAGE: &str = "Please log in to access this resource";

/// Message for dependency failures. Internal detail is only logged.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed request (400).
    BadRequest,
    /// Input failed validation (400).
    ValidationError,
    /// Duplicate resource (400).
    Conflict,
    /// Missing or invalid authentication (401).
    Unauthorized,
    /// Authenticated but not allowed (403).
    Forbidden,
    /// Not found (404).
    NotFound,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    ///
    /// Conflicts are reported as 400, which is what existing clients expect
    /// for a taken username.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest | ErrorCode::ValidationError | ErrorCode::Conflict => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub message: String,
    /// Error code.
    pub code: ErrorCode,
    /// Field-level validation error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Vec<String>>>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Create a validation error from validator::ValidationErrors.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut details: HashMap<String, Vec<String>> = HashMap::new();

        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {field}"))
                })
                .collect();
            details.insert(field.to_string(), messages);
        }

        let message = details
            .values()
            .flatten()
            .next()
            .cloned()
            .unwrap_or_else(|| "Validation failed".to_string());

        Self {
            code: ErrorCode::ValidationError,
            message,
            details: Some(details),
        }
    }

    /// The error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The caller-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            message: self.message,
            code: self.code,
            details: self.details,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::InvalidUsername(_) => ApiError::validation(INVALID_USERNAME_MESSAGE),
            AuthError::InvalidPassword(e) => ApiError::validation(capitalize(&e.to_string())),
            AuthError::InvalidRole(role) => ApiError::validation(format!("Invalid role: {role}")),
            AuthError::UsernameTaken => ApiError::conflict(USERNAME_TAKEN_MESSAGE),
            AuthError::InvalidCredentials => ApiError::unauthorized(INVALID_CREDENTIALS_MESSAGE),
            AuthError::Unauthorized => ApiError::unauthorized(UNAUTHORIZED_MESSAGE),
            AuthError::StoreUnavailable(_) | AuthError::Hasher(_) => {
                debug_assert_eq!(err.kind(), ErrorKind::Dependency);
                tracing::error!(error = %err, "Authentication dependency failed");
                ApiError::internal(SERVER_ERROR_MESSAGE)
            }
        }
    }
}

impl From<LoreError> for ApiError {
    fn from(err: LoreError) -> Self {
        match &err {
            LoreError::Validation(msg) => ApiError::validation(capitalize(msg)),
            LoreError::NotFound(what) => ApiError::not_found(format!("{} not found", capitalize(what))),
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal(SERVER_ERROR_MESSAGE)
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
