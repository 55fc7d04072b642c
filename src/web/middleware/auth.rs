//! Request authentication middleware.
//!
//! Extracts a session token from the request (cookie first, then bearer
//! header), verifies it, and resolves it to a user record.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::{require_admin, AuthService};
use crate::db::User;
use crate::web::error::ApiError;

/// Name of the session token cookie.
pub const SESSION_COOKIE: &str = "token";

/// Extract a session token from the request parts.
///
/// Ordered fallback chain: the session cookie wins over the
/// `Authorization: Bearer` header; first non-empty match is used.
pub fn extract_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Extractor for authenticated users.
///
/// Handlers that require authentication take this extractor; it rejects
/// the request with 401 when no valid token resolves to an existing user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token =
            extract_token(parts).ok_or_else(|| ApiError::unauthorized("Missing authorization"))?;

        // Auth service reaches the extractor via extensions (set by middleware)
        let service = parts
            .extensions
            .get::<Arc<AuthService>>()
            .ok_or_else(|| ApiError::internal("Auth service not configured"))?
            .clone();

        let user = service.authenticate(&token).await?;

        Ok(AuthUser(user))
    }
}

/// Extractor for authenticated administrators.
///
/// Runs the authenticate-then-authorize pipeline: resolves the user like
/// [`AuthUser`], then checks the admin role requirement.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        require_admin(Some(&user))?;

        Ok(AdminUser(user))
    }
}

/// Middleware function that injects the auth service into request extensions.
pub async fn auth_state(
    service: Arc<AuthService>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(service);
    next.run(request).await
}
