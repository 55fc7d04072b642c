//! Authentication handlers.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::auth::AuthSession;
use crate::web::dto::{
    ApiResponse, AuthResponse, LoginRequest, MessageResponse, RegisterRequest, UserInfo,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, SESSION_COOKIE};

use super::AppState;

/// Build the session cookie carrying the token.
///
/// HTTP-only and same-site strict; `Secure` only in production-like
/// environments per configuration.
fn session_cookie(token: &str, max_age_secs: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(time::Duration::seconds(max_age_secs as i64))
        .build()
}

/// Cookie used to clear the session on logout.
fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

fn auth_response(session: AuthSession) -> AuthResponse {
    AuthResponse {
        user: UserInfo::from(&session.user),
        token: session.token,
    }
}

/// POST /api/auth/register - Create a new account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(CookieJar, Json<ApiResponse<AuthResponse>>), ApiError> {
    let session = state
        .auth
        .register(&req.email, &req.password, req.name.as_deref())
        .await?;

    let jar = jar.add(session_cookie(
        &session.token,
        state.auth.tokens().expiry_secs(),
        state.secure_cookies,
    ));

    Ok((jar, Json(ApiResponse::new(auth_response(session)))))
}

/// POST /api/auth/login - Log in with email and password.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<AuthResponse>>), ApiError> {
    let session = state.auth.login(&req.email, &req.password).await?;

    let jar = jar.add(session_cookie(
        &session.token,
        state.auth.tokens().expiry_secs(),
        state.secure_cookies,
    ));

    Ok((jar, Json(ApiResponse::new(auth_response(session)))))
}

/// POST /api/auth/logout - Log out.
///
/// Purely a client-side effect: the session cookie is removed. An already
/// issued token stays valid until its natural expiry (stateless sessions,
/// no revocation list).
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let jar = jar.remove(removal_cookie());

    (
        jar,
        Json(ApiResponse::new(MessageResponse::new("Logout successful"))),
    )
}

/// GET /api/auth/profile - Current user info.
pub async fn profile(AuthUser(user): AuthUser) -> Json<ApiResponse<UserInfo>> {
    Json(ApiResponse::new(UserInfo::from(&user)))
}
