//! Item API Handlers

use axum::Json;
use axum::extract::{Path, State};

use crate::core::ServerState;
use crate::db::models::{Item, ItemCreate, ItemUpdate};
use crate::db::repository::{ItemRepository, RepoError};
use crate::error::{ApiResponse, AppError, AppResult, ErrorCode};

fn repo_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::ItemNotFound, msg),
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
        RepoError::InUse(msg) => {
            AppError::with_message(ErrorCode::ItemHasActiveReservation, msg)
        }
        RepoError::Validation(msg) => AppError::validation(msg),
    }
}

/// GET /api/items - the whole catalog
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Item>>> {
    let repo = ItemRepository::new(state.store.clone());
    Ok(ApiResponse::success(repo.find_all()))
}

/// GET /api/items/disponiveis - items free to reserve right now
pub async fn list_available(
    State(state): State<ServerState>,
) -> AppResult<ApiResponse<Vec<Item>>> {
    Ok(ApiResponse::success(state.engine.available_items()))
}

/// GET /api/items/{id} - single item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Item>> {
    let repo = ItemRepository::new(state.store.clone());
    let item = repo
        .find_by_id(&id)
        .ok_or_else(|| AppError::item_not_found(id))?;
    Ok(ApiResponse::success(item))
}

/// POST /api/items - add an item to the catalog
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ItemCreate>,
) -> AppResult<ApiResponse<Item>> {
    let repo = ItemRepository::new(state.store.clone());
    let item = repo.create(payload).map_err(repo_error)?;
    Ok(ApiResponse::success(item))
}

/// PUT /api/items/{id} - update name/category/location
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ItemUpdate>,
) -> AppResult<ApiResponse<Item>> {
    let repo = ItemRepository::new(state.store.clone());
    let item = repo.update(&id, payload).map_err(repo_error)?;
    Ok(ApiResponse::success(item))
}

/// DELETE /api/items/{id} - remove an item
///
/// Refused while an active reservation references it.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<bool>> {
    let repo = ItemRepository::new(state.store.clone());
    let removed = repo.delete(&id).map_err(repo_error)?;
    Ok(ApiResponse::success(removed))
}
