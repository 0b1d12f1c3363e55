//! Router configuration for the web API.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_profile_comment, get_own_profile, get_public_profile, get_user_manga,
    list_profile_comments, login, logout, me, register, toggle_favorite, toggle_follow,
    toggle_reading, update_profile_picture, AppState,
};
use super::middleware::{create_cors_layer, require_auth};

/// Create the main API router.
///
/// Routes behind the gate are attached with `route_layer`, so an unknown
/// path is still a 404 rather than a 401.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let gate = || middleware::from_fn_with_state(app_state.clone(), require_auth);

    // Auth routes (no session required)
    let auth_public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout));

    // Auth routes (session required)
    let auth_protected_routes = Router::new()
        .route("/me", get(me))
        .route_layer(gate());

    let auth_routes = Router::new()
        .merge(auth_public_routes)
        .merge(auth_protected_routes);

    // User routes (session required)
    let user_protected_routes = Router::new()
        .route("/profile", get(get_own_profile))
        .route("/profile/picture", post(update_profile_picture))
        .route("/:id/manga", get(get_user_manga))
        .route("/:id/follow/:manga_id", post(toggle_follow))
        .route("/:id/favorite/:manga_id", post(toggle_favorite))
        .route("/:id/reading/:manga_id", post(toggle_reading))
        .route_layer(gate());

    // User routes (public). Posting a comment needs a session; reading does not.
    let user_public_routes = Router::new()
        .route("/profile/:id", get(get_public_profile))
        .route(
            "/profile/:id/comments",
            post(create_profile_comment)
                .route_layer(gate())
                .get(list_profile_comments),
        );

    let user_routes = Router::new()
        .merge(user_protected_routes)
        .merge(user_public_routes);

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes);

    Router::new()
        .nest("/api", api_routes)
        .merge(create_health_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
