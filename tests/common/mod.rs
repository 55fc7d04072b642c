//! Test helpers for Web API integration tests.

use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use storefront::web::handlers::AppState;
use storefront::web::router::create_router;
use storefront::{Config, Database, Role, UserRepository, UserUpdate};

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// Create a test configuration.
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.auth.jwt_secret = TEST_JWT_SECRET.to_string();
    config.logging.level = "warn".to_string();
    config
}

/// Create a test server with an in-memory database.
///
/// Cookies are saved between requests so the session cookie set by
/// register/login is sent back automatically.
pub async fn create_test_server() -> (TestServer, Database) {
    let config = create_test_config();

    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let app_state = Arc::new(AppState::new(db.clone(), &config));
    let router = create_router(app_state, &config.server.cors_origins);

    let mut server = TestServer::new(router).expect("Failed to create test server");
    server.save_cookies();

    (server, db)
}

/// Helper to register a test user and return the response body.
pub async fn register_user(server: &TestServer, email: &str, password: &str, name: &str) -> Value {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": email,
            "password": password,
            "name": name
        }))
        .await;

    response.json::<Value>()
}

/// Helper to login and return the response body.
pub async fn login_user(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": email,
            "password": password
        }))
        .await;

    response.json::<Value>()
}

/// Promote an existing user to admin directly in the database.
pub async fn promote_to_admin(db: &Database, email: &str) {
    let repo = UserRepository::new(db.pool());
    let user = repo
        .get_by_email(email)
        .await
        .expect("Failed to query user")
        .expect("User not found");

    repo.update(user.id, &UserUpdate::new().role(Role::Admin))
        .await
        .expect("Failed to promote user");
}
