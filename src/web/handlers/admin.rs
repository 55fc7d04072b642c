//! Admin handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::db::UserRepository;
use crate::web::dto::{AdminUserResponse, ApiResponse};
use crate::web::error::ApiError;
use crate::web::middleware::AdminUser;

use super::AppState;

/// GET /api/admin/users - List all accounts (admin only).
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<ApiResponse<Vec<AdminUserResponse>>>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let users = repo.list_all().await.map_err(|e| {
        tracing::error!("Failed to list users: {}", e);
        ApiError::internal("Internal server error")
    })?;

    let users = users.iter().map(AdminUserResponse::from).collect();
    Ok(Json(ApiResponse::new(users)))
}
