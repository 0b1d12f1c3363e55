//! Session authorization gate.
//!
//! `require_auth` sits in front of every protected route. It resolves the
//! session cookie into an [`Identity`] through [`AuthService::authorize`] and
//! stores it in the request extensions, where [`AuthUser`] picks it up.
//!
//! [`AuthService::authorize`]: crate::auth::AuthService::authorize

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{AuthError, Identity};
use crate::web::error::{ApiError, UNAUTHORIZED_MESSAGE};
use crate::web::handlers::AppState;

/// Middleware admitting only requests with a live session.
///
/// Rejections are 401; store failures are 500 so clients can tell "not
/// logged in" apart from "server broken".
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = match state.auth.authorize(state.cookies.read(&jar)).await {
        Ok(identity) => identity,
        Err(AuthError::Unauthorized) => {
            tracing::debug!(path = %request.uri().path(), "Rejected request without a valid session");
            return Err(ApiError::unauthorized(UNAUTHORIZED_MESSAGE));
        }
        Err(e) => return Err(e.into()),
    };

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Extractor for the identity admitted by [`require_auth`].
///
/// Fails with 401 on routes the gate does not cover.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::unauthorized(UNAUTHORIZED_MESSAGE))
    }
}
