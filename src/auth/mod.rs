//! Authentication and authorization.
//!
//! Password hashing, session token issuing/verification, the auth flow,
//! and role-based permission checks.

pub mod password;
pub mod permission;
pub mod service;
pub mod token;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use permission::{check_permission, require_admin, PermissionError};
pub use service::{AuthError, AuthService, AuthSession};
pub use token::{Claims, TokenError, TokenIssuer};
