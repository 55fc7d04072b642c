//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{admin, auth, health, AppState};
use super::middleware::{auth_state, create_cors_layer};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    // Auth routes (no authentication required)
    let auth_public_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout));

    // Auth routes (authentication required)
    let auth_protected_routes = Router::new().route("/profile", get(auth::profile));

    let auth_routes = Router::new()
        .merge(auth_public_routes)
        .merge(auth_protected_routes);

    // Admin routes (admin role required)
    let admin_routes = Router::new().route("/users", get(admin::list_users));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/admin", admin_routes);

    // Clone the auth service for the middleware closure
    let auth_for_middleware = app_state.auth.clone();

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let service = auth_for_middleware.clone();
                    auth_state(service, req, next)
                })),
        )
        .with_state(app_state)
}
