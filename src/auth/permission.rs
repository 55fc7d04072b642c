//! Role-based authorization.
//!
//! Routes declare the role set they require; the check runs after the
//! request authenticator has resolved the user.

use thiserror::Error;

use crate::db::{Role, User};

/// Permission-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// User's role is not in the route's required set.
    #[error("this operation requires one of the following roles: {0}")]
    InsufficientRole(String),

    /// No authenticated user was attached to the request.
    #[error("authentication required")]
    NotAuthenticated,
}

/// Check whether a user may access a route requiring one of `required`.
///
/// An absent user is always denied; authorization never runs without the
/// authenticator having attached a user first.
pub fn check_permission(user: Option<&User>, required: &[Role]) -> Result<(), PermissionError> {
    let user = user.ok_or(PermissionError::NotAuthenticated)?;

    if !required.contains(&user.role) {
        let roles = required
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(PermissionError::InsufficientRole(roles));
    }

    Ok(())
}

/// Require the admin role.
pub fn require_admin(user: Option<&User>) -> Result<(), PermissionError> {
    check_permission(user, &[Role::Admin])
}
