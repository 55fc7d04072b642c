//! HTTP request handlers.

pub mod admin;
pub mod auth;

use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::auth::{AuthService, TokenIssuer};
use crate::config::Config;
use crate::db::Database;

/// Shared state for request handlers.
pub struct AppState {
    pub db: Database,
    pub auth: Arc<AuthService>,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(db: Database, config: &Config) -> Self {
        let tokens = TokenIssuer::new(&config.auth.jwt_secret, config.auth.token_expiry_days);
        let auth = Arc::new(AuthService::new(db.pool().clone(), tokens));

        Self {
            db,
            auth,
            secure_cookies: config.auth.secure_cookies,
        }
    }
}

/// GET /health - Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
