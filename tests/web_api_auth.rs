//! Web API Authentication Tests
//!
//! Integration tests for registration, login, logout, and profile
//! endpoints, covering both the cookie and bearer token paths.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use storefront::auth::Claims;
use storefront::{Role, UserRepository};

use common::{create_test_server, login_user, register_user, TEST_JWT_SECRET};

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_success() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "password123",
            "name": "Alice"
        }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["email"], "alice@example.com");
    assert_eq!(body["data"]["user"]["name"], "Alice");
    assert_eq!(body["data"]["user"]["role"], "USER");
    // The stored password hash must never appear in a response
    assert!(body["data"]["user"].get("password").is_none());
}

#[tokio::test]
async fn test_register_sets_session_cookie() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "password123"
        }))
        .await;

    response.assert_status_ok();

    let cookie = response.cookie("token");
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(
        cookie.max_age(),
        Some(time::Duration::days(7)),
        "cookie lifetime should match the token expiry"
    );
    // Secure is off by default; enabled via secure_cookies in production
    assert_ne!(cookie.secure(), Some(true));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (server, db) = create_test_server().await;

    server
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "password123"
        }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "different456"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFLICT");

    // The failed attempt must not create another row
    let count = UserRepository::new(db.pool()).count().await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_register_duplicate_email_case_insensitive() {
    let (server, _db) = create_test_server().await;

    server
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "password123"
        }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "Alice@Example.COM",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_short_password() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "short"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["password"].is_array());
}

#[tokio::test]
async fn test_register_invalid_email() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "not-an-email",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_without_name() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "password123"
        }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["user"]["email"], "alice@example.com");
    assert!(body["data"]["user"].get("name").is_none());
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let (server, _db) = create_test_server().await;

    register_user(&server, "alice@example.com", "password123", "Alice").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "password123"
        }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["email"], "alice@example.com");

    let cookie = response.cookie("token");
    assert_eq!(cookie.value(), body["data"]["token"].as_str().unwrap());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _db) = create_test_server().await;

    register_user(&server, "alice@example.com", "password123", "Alice").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "wrongpassword"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (server, _db) = create_test_server().await;

    register_user(&server, "alice@example.com", "password123", "Alice").await;

    // Wrong password for an existing account
    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "wrongpassword"
        }))
        .await;

    // Account that doesn't exist at all
    let unknown_email = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "password123"
        }))
        .await;

    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);

    // Same status and same body, so responses don't reveal which
    // emails are registered
    let body_a: Value = wrong_password.json();
    let body_b: Value = unknown_email.json();
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn test_login_empty_credentials() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "",
            "password": ""
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_profile_via_cookie() {
    let (server, _db) = create_test_server().await;

    register_user(&server, "alice@example.com", "password123", "Alice").await;

    // The saved session cookie authenticates this request
    let response = server.get("/api/auth/profile").await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["role"], "USER");
}

#[tokio::test]
async fn test_profile_via_bearer_token() {
    let (mut server, _db) = create_test_server().await;

    let body = register_user(&server, "alice@example.com", "password123", "Alice").await;
    let token = body["data"]["token"].as_str().expect("No token");

    // Drop the cookie so only the Authorization header carries the token
    server.clear_cookies();

    let response = server
        .get("/api/auth/profile")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_profile_unauthenticated() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/api/auth/profile").await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_profile_invalid_token() {
    let (server, _db) = create_test_server().await;

    let response = server
        .get("/api/auth/profile")
        .add_header(AUTHORIZATION, "Bearer invalid-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_expired_token() {
    let (mut server, _db) = create_test_server().await;

    register_user(&server, "alice@example.com", "password123", "Alice").await;
    server.clear_cookies();

    // Sign an already expired token with the server's secret
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = Claims {
        sub: 1,
        email: "alice@example.com".to_string(),
        role: Role::User,
        iat: now - 7200,
        exp: now - 3600,
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let response = server
        .get("/api/auth/profile")
        .add_header(AUTHORIZATION, format!("Bearer {}", expired))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_tampered_token() {
    let (mut server, _db) = create_test_server().await;

    let body = register_user(&server, "alice@example.com", "password123", "Alice").await;
    let token = body["data"]["token"].as_str().expect("No token");
    server.clear_cookies();

    // Flip a character in the payload segment
    let mut parts: Vec<String> = token.split('.').map(|s| s.to_string()).collect();
    let mut payload = parts[1].clone().into_bytes();
    payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
    parts[1] = String::from_utf8(payload).unwrap();
    let tampered = parts.join(".");

    let response = server
        .get("/api/auth/profile")
        .add_header(AUTHORIZATION, format!("Bearer {}", tampered))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_token_for_deleted_user() {
    let (server, db) = create_test_server().await;

    let body = register_user(&server, "alice@example.com", "password123", "Alice").await;
    let user_id = body["data"]["user"]["id"].as_i64().expect("No user id");

    UserRepository::new(db.pool()).delete(user_id).await.unwrap();

    // The token still has a valid signature but the account is gone
    let response = server.get("/api/auth/profile").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cookie_takes_precedence_over_bearer() {
    let (server, _db) = create_test_server().await;

    // Cookie from Alice's registration is saved on the server
    register_user(&server, "alice@example.com", "password123", "Alice").await;

    let bob = register_user(&server, "bob@example.com", "password123", "Bob").await;
    let bob_token = bob["data"]["token"].as_str().expect("No token");

    // Re-login as Alice so the saved cookie holds her session,
    // then attach Bob's token as a bearer header
    login_user(&server, "alice@example.com", "password123").await;

    let response = server
        .get("/api/auth/profile")
        .add_header(AUTHORIZATION, format!("Bearer {}", bob_token))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["email"], "alice@example.com");
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (server, _db) = create_test_server().await;

    register_user(&server, "alice@example.com", "password123", "Alice").await;

    let response = server.post("/api/auth/logout").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["message"], "Logout successful");

    // With the cookie removed, the session is gone
    let response = server.get("/api/auth/profile").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_does_not_invalidate_token() {
    let (server, _db) = create_test_server().await;

    let body = register_user(&server, "alice@example.com", "password123", "Alice").await;
    let token = body["data"]["token"].as_str().expect("No token");

    server.post("/api/auth/logout").await.assert_status_ok();

    // Sessions are stateless: a previously issued token stays valid
    // until its natural expiry
    let response = server
        .get("/api/auth/profile")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_logout_without_session() {
    let (server, _db) = create_test_server().await;

    // Logout is idempotent and requires no authentication
    let response = server.post("/api/auth/logout").await;
    response.assert_status_ok();
}

// ============================================================================
// Token Claim Tests
// ============================================================================

#[tokio::test]
async fn test_token_contains_expected_claims() {
    let (server, _db) = create_test_server().await;

    let body = register_user(&server, "alice@example.com", "password123", "Alice").await;
    let token = body["data"]["token"].as_str().expect("No token");

    // Decode the JWT payload (base64 decode the middle part)
    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3, "JWT should have 3 parts");

    use base64::Engine;
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let payload = engine
        .decode(parts[1])
        .expect("Failed to decode JWT payload");
    let claims: Value = serde_json::from_slice(&payload).expect("Failed to parse claims");

    assert_eq!(claims["email"], "alice@example.com");
    assert_eq!(claims["role"], "USER");
    assert!(claims["sub"].is_number());
    assert!(claims["iat"].is_number());
    assert!(claims["exp"].is_number());
}

#[tokio::test]
async fn test_register_and_login_tokens_both_valid() {
    let (mut server, _db) = create_test_server().await;

    let register_body =
        register_user(&server, "alice@example.com", "password123", "Alice").await;
    let login_body = login_user(&server, "alice@example.com", "password123").await;

    let register_token = register_body["data"]["token"].as_str().expect("No token");
    let login_token = login_body["data"]["token"].as_str().expect("No token");

    server.clear_cookies();

    for token in [register_token, login_token] {
        let response = server
            .get("/api/auth/profile")
            .add_header(AUTHORIZATION, format!("Bearer {}", token))
            .await;
        response.assert_status_ok();
    }
}

// ============================================================================
// Health Check
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
