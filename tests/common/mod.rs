//! Test helpers for web API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};

use lorelib::config::{Config, Environment, SessionBackend};
use lorelib::web::{create_router, AppState};
use lorelib::Database;

/// Name of the session cookie in the default configuration.
pub const SESSION_COOKIE: &str = "lorelib.sid";

/// Development configuration with cheap password hashing.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.server.environment = Environment::Development;
    config.session.store = SessionBackend::Memory;
    config.security.argon2_memory_kib = 1024;
    config.security.argon2_iterations = 1;
    config.security.argon2_parallelism = 1;
    config
}

/// Create a test server over a fresh in-memory database.
pub async fn create_test_server() -> (TestServer, Arc<AppState>) {
    create_test_server_with(test_config()).await
}

/// Create a test server with the given configuration.
pub async fn create_test_server_with(config: Config) -> (TestServer, Arc<AppState>) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    create_test_server_on(db, &config)
}

/// Create a test server over an existing database.
pub fn create_test_server_on(db: Database, config: &Config) -> (TestServer, Arc<AppState>) {
    let state = Arc::new(AppState::from_config(db, config).expect("Failed to build app state"));
    let router = create_router(state.clone(), &config.cors.allowed_origins);
    let server = TestServer::new(router).expect("Failed to create test server");
    (server, state)
}

/// Register a user.
pub async fn register(server: &TestServer, username: &str, password: &str) -> TestResponse {
    server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "password": password,
            "role": "reader"
        }))
        .await
}

/// Log a user in.
pub async fn login(server: &TestServer, username: &str, password: &str) -> TestResponse {
    server
        .post("/api/auth/login")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await
}

/// Register a user and return `(user id, session cookie value)`.
pub async fn register_user(server: &TestServer, username: &str) -> (i64, String) {
    let response = register(server, username, "Secret!1").await;
    let body: Value = response.json();
    let id = body["user"]["id"].as_i64().expect("missing user id");
    let cookie = response.cookie(SESSION_COOKIE).value().to_string();
    (id, cookie)
}

/// Value of the first `Set-Cookie` header.
pub fn set_cookie_header(response: &TestResponse) -> String {
    response
        .headers()
        .get("set-cookie")
        .expect("missing Set-Cookie header")
        .to_str()
        .expect("non-ASCII Set-Cookie header")
        .to_string()
}
