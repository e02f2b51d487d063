//! Reservation API Handlers

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use crate::api::convert::{ReservationDetail, reservation_detail, reservation_details};
use crate::core::ServerState;
use crate::error::{ApiResponse, AppResult};

/// POST /api/reservas request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub item_id: String,
    pub user_badge: String,
}

/// PATCH lifecycle request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActingBadge {
    pub user_badge: String,
}

/// GET /api/reservas - full history, newest first
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<ApiResponse<Vec<ReservationDetail>>> {
    let rows = state.engine.list_all();
    Ok(ApiResponse::success(reservation_details(&state.store, rows)))
}

/// GET /api/reservas/usuario/matricula/{badge} - history for one user
pub async fn list_by_badge(
    State(state): State<ServerState>,
    Path(badge): Path<String>,
) -> AppResult<ApiResponse<Vec<ReservationDetail>>> {
    let rows = state.gateway.history_by_badge(&badge)?;
    Ok(ApiResponse::success(reservation_details(&state.store, rows)))
}

/// GET /api/reservas/ativas/matricula/{badge} - active reservations only
pub async fn list_active_by_badge(
    State(state): State<ServerState>,
    Path(badge): Path<String>,
) -> AppResult<ApiResponse<Vec<ReservationDetail>>> {
    let rows = state.gateway.active_by_badge(&badge)?;
    Ok(ApiResponse::success(reservation_details(&state.store, rows)))
}

/// POST /api/reservas - place a hold on an item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationRequest>,
) -> AppResult<ApiResponse<ReservationDetail>> {
    let reservation = state
        .gateway
        .reserve_by_badge(&payload.user_badge, &payload.item_id)?;
    Ok(ApiResponse::success(reservation_detail(
        &state.store,
        reservation,
    )))
}

/// PATCH /api/reservas/{id}/retirada - hand the item over
pub async fn check_out(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ActingBadge>,
) -> AppResult<ApiResponse<ReservationDetail>> {
    let reservation = state.gateway.check_out_by_badge(&payload.user_badge, &id)?;
    Ok(ApiResponse::success(reservation_detail(
        &state.store,
        reservation,
    )))
}

/// PATCH /api/reservas/{id}/devolucao - take the item back
pub async fn return_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ActingBadge>,
) -> AppResult<ApiResponse<ReservationDetail>> {
    let reservation = state.gateway.return_by_badge(&payload.user_badge, &id)?;
    Ok(ApiResponse::success(reservation_detail(
        &state.store,
        reservation,
    )))
}
