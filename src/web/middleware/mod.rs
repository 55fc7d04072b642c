//! Middleware for the Web API.

pub mod auth;
pub mod cors;

pub use auth::{auth_state, extract_token, AdminUser, AuthUser, SESSION_COOKIE};
pub use cors::create_cors_layer;
