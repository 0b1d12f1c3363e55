//! Authentication handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::RegistrationRequest;
use crate::web::dto::{
    AuthResponse, LoginRequest, MeResponse, MessageResponse, RegisterRequest, UserInfo,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// Destroy the session the request already carries, if any.
///
/// Called before issuing a new session so a browser never holds two. Failure
/// here does not block the login.
async fn retire_current_session(state: &AppState, jar: &CookieJar) {
    let Some(current) = state.cookies.read(jar) else {
        return;
    };
    if let Err(e) = state.auth.logout(Some(current)).await {
        tracing::warn!(error = %e, "Failed to retire previous session");
    }
}

/// POST /api/auth/register - Create an account and log it in.
pub async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), ApiError> {
    let mut request = RegistrationRequest::new(req.username, req.password);
    if let Some(role) = req.role {
        request = request.with_role(role);
    }

    let registration = state.auth.register(request).await?;

    retire_current_session(&state, &jar).await;
    let jar = state.cookies.set(jar, &registration.session.id);

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: UserInfo::from(&registration.account),
        }),
    ))
}

/// POST /api/auth/login - Verify credentials and open a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let session = state.auth.login(&req.username, &req.password).await?;

    retire_current_session(&state, &jar).await;
    let jar = state.cookies.set(jar, &session.id);

    Ok((
        jar,
        Json(AuthResponse {
            message: "Login successful".to_string(),
            user: UserInfo::from(&session),
        }),
    ))
}

/// POST /api/auth/logout - End the session and clear the cookie.
///
/// Succeeds whether or not the request carried a live session.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    state
        .auth
        .logout(state.cookies.read(&jar))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Logout failed");
            ApiError::internal("Internal server error")
        })?;

    Ok((
        state.cookies.clear(jar),
        Json(MessageResponse::new("Logout successful")),
    ))
}

/// GET /api/auth/me - The identity the gate admitted.
pub async fn me(AuthUser(identity): AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: identity.into(),
    })
}
