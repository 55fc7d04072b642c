//! Storefront - E-commerce backend API
//!
//! REST backend with cookie/bearer dual-mode authentication and
//! role-based authorization, backed by SQLite.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    check_permission, hash_password, require_admin, validate_password, verify_password,
    AuthError, AuthService, AuthSession, Claims, PasswordError, PermissionError, TokenError,
    TokenIssuer,
};
pub use config::Config;
pub use db::{Database, NewUser, Role, User, UserRepository, UserUpdate};
pub use error::{Result, StorefrontError};
pub use web::{create_router, ApiError, AppState, WebServer};
