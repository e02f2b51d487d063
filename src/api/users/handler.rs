//! User API Handlers

use axum::Json;
use axum::extract::{Path, State};

use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserUpdate};
use crate::db::repository::{RepoError, UserRepository};
use crate::error::{ApiResponse, AppError, AppResult, ErrorCode};

fn repo_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::UserNotFound, msg),
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::BadgeCodeExists, msg),
        RepoError::InUse(msg) => AppError::with_message(ErrorCode::UserHasActiveReservation, msg),
        RepoError::Validation(msg) => AppError::validation(msg),
    }
}

/// GET /api/users - all registered users
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<User>>> {
    let repo = UserRepository::new(state.store.clone());
    Ok(ApiResponse::success(repo.find_all()))
}

/// GET /api/users/{id} - single user
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<User>> {
    let repo = UserRepository::new(state.store.clone());
    let user = repo
        .find_by_id(&id)
        .ok_or_else(|| AppError::user_not_found(id))?;
    Ok(ApiResponse::success(user))
}

/// GET /api/users/matricula/{badge} - resolve a badge code
pub async fn get_by_badge(
    State(state): State<ServerState>,
    Path(badge): Path<String>,
) -> AppResult<ApiResponse<User>> {
    let repo = UserRepository::new(state.store.clone());
    let user = repo
        .find_by_badge(&badge)
        .ok_or_else(|| AppError::badge_not_found(badge))?;
    Ok(ApiResponse::success(user))
}

/// POST /api/users - register a user
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<ApiResponse<User>> {
    let repo = UserRepository::new(state.store.clone());
    let user = repo.create(payload).map_err(repo_error)?;
    Ok(ApiResponse::success(user))
}

/// PUT /api/users/{id} - update a user
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<ApiResponse<User>> {
    let repo = UserRepository::new(state.store.clone());
    let user = repo.update(&id, payload).map_err(repo_error)?;
    Ok(ApiResponse::success(user))
}

/// DELETE /api/users/{id} - remove a user
///
/// Refused while the user still has an active reservation.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<bool>> {
    let repo = UserRepository::new(state.store.clone());
    let removed = repo.delete(&id).map_err(repo_error)?;
    Ok(ApiResponse::success(removed))
}
