//! Web API for the storefront.
//!
//! Serves the REST API: account registration and login, session handling
//! via cookie or bearer token, and admin endpoints.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
