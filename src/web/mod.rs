//! Web API module for LoreLibrary.
//!
//! This module provides the session-authenticated REST API: registration,
//! login and logout, the authorization gate, and the profile routes behind it.

pub mod cookie;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use cookie::SessionCookie;
pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
