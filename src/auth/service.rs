//! Authentication flow.
//!
//! Orchestrates register/login/whoami against the user store, the password
//! hasher, and the token issuer. All collaborators are passed in explicitly
//! at construction.

use sqlx::SqlitePool;
use thiserror::Error;

use super::password::{hash_password, verify_password, PasswordError};
use super::token::{TokenError, TokenIssuer};
use crate::db::{NewUser, User, UserRepository};

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Registration conflict: the email is already taken.
    #[error("email already in use")]
    EmailInUse,

    /// Login failure. Deliberately identical for "no such user" and
    /// "wrong password" so callers cannot enumerate registered emails.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Missing, invalid, or expired token, or the token's subject no
    /// longer exists.
    #[error("authentication required")]
    Unauthenticated,

    /// Authenticated but lacking the required role.
    #[error("insufficient permissions")]
    Forbidden,

    /// Password did not meet requirements.
    #[error("password error: {0}")]
    Password(PasswordError),

    /// Store or signing failure.
    #[error("internal auth error: {0}")]
    Internal(String),
}

/// A successfully authenticated or registered session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The resolved user record.
    pub user: User,
    /// The issued session token.
    pub token: String,
}

/// Authentication service.
///
/// Cheap to clone; handlers share one instance through the app state.
#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    tokens: TokenIssuer,
}

impl AuthService {
    /// Create a new authentication service.
    pub fn new(pool: SqlitePool, tokens: TokenIssuer) -> Self {
        Self { pool, tokens }
    }

    /// The token issuer used by this service.
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Register a new account.
    ///
    /// Fails with [`AuthError::EmailInUse`] if the email is taken. On
    /// success the password is hashed, the user is created with the default
    /// role, and a session token is issued.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthSession, AuthError> {
        let repo = UserRepository::new(&self.pool);

        if repo
            .email_exists(email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
        {
            return Err(AuthError::EmailInUse);
        }

        let password_hash = hash_password(password).map_err(AuthError::Password)?;

        let mut new_user = NewUser::new(email, password_hash);
        if let Some(name) = name {
            new_user = new_user.with_name(name);
        }

        let user = repo.create(&new_user).await.map_err(|e| {
            // The unique index closes the lookup/insert race
            if e.to_string().contains("UNIQUE") {
                AuthError::EmailInUse
            } else {
                tracing::error!("user creation failed: {}", e);
                AuthError::Internal(e.to_string())
            }
        })?;

        let token = self.issue_for(&user)?;
        tracing::info!(user_id = user.id, "registered new user");

        Ok(AuthSession { user, token })
    }

    /// Log in with email and password.
    ///
    /// Unknown email and wrong password both fail with the same
    /// [`AuthError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let repo = UserRepository::new(&self.pool);

        let user = repo
            .get_by_email(email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password).map_err(|_| AuthError::InvalidCredentials)?;

        let token = self.issue_for(&user)?;
        tracing::debug!(user_id = user.id, "login successful");

        Ok(AuthSession { user, token })
    }

    /// Resolve a session token to a user.
    ///
    /// Verifies the token, then re-resolves the subject claim by id against
    /// the store; a token whose subject no longer exists is rejected.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.tokens.verify(token).map_err(|e| match e {
            TokenError::Invalid => AuthError::Unauthenticated,
            TokenError::Signing(msg) => AuthError::Internal(msg),
        })?;

        let repo = UserRepository::new(&self.pool);
        repo.get_by_id(claims.sub)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::Unauthenticated)
    }

    fn issue_for(&self, user: &User) -> Result<String, AuthError> {
        self.tokens
            .issue(user.id, &user.email, user.role)
            .map_err(|e| {
                tracing::error!("failed to issue token: {}", e);
                AuthError::Internal(e.to_string())
            })
    }
}
