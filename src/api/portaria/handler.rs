//! Front Desk API Handlers

use axum::extract::{Path, Query, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::convert::{ReservationDetail, reservation_detail, reservation_details};
use crate::core::ServerState;
use crate::db::models::User;
use crate::error::{ApiResponse, AppError, AppResult};
use crate::reservations::DashboardSnapshot;

/// GET /api/portaria/cracha/{badge} - resolve a scanned badge
pub async fn read_badge(
    State(state): State<ServerState>,
    Path(badge): Path<String>,
) -> AppResult<ApiResponse<User>> {
    let user = state.gateway.resolve(&badge)?;
    Ok(ApiResponse::success(user))
}

/// GET /api/portaria/cracha/{badge}/reservas-ativas - what the user holds
pub async fn active_for_badge(
    State(state): State<ServerState>,
    Path(badge): Path<String>,
) -> AppResult<ApiResponse<Vec<ReservationDetail>>> {
    let rows = state.gateway.active_by_badge(&badge)?;
    Ok(ApiResponse::success(reservation_details(&state.store, rows)))
}

/// POST /api/portaria/cracha/{badge}/reservar/{itemId} - reserve from a scan
pub async fn reserve(
    State(state): State<ServerState>,
    Path((badge, item_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<ReservationDetail>> {
    let reservation = state.gateway.reserve_by_badge(&badge, &item_id)?;
    Ok(ApiResponse::success(reservation_detail(
        &state.store,
        reservation,
    )))
}

/// POST /api/portaria/cracha/{badge}/retirar/{reservationId} - hand over
pub async fn check_out(
    State(state): State<ServerState>,
    Path((badge, reservation_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<ReservationDetail>> {
    let reservation = state.gateway.check_out_by_badge(&badge, &reservation_id)?;
    Ok(ApiResponse::success(reservation_detail(
        &state.store,
        reservation,
    )))
}

/// POST /api/portaria/cracha/{badge}/devolver/{reservationId} - take back
pub async fn return_item(
    State(state): State<ServerState>,
    Path((badge, reservation_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<ReservationDetail>> {
    let reservation = state.gateway.return_by_badge(&badge, &reservation_id)?;
    Ok(ApiResponse::success(reservation_detail(
        &state.store,
        reservation,
    )))
}

/// GET /api/portaria/dashboard - desk landing page counters
pub async fn dashboard(
    State(state): State<ServerState>,
) -> AppResult<ApiResponse<DashboardSnapshot>> {
    Ok(ApiResponse::success(state.engine.dashboard()))
}

/// Query for DELETE /api/portaria/limpar
#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    /// Badge of the acting attendant
    pub operador: Option<String>,
}

/// Summary returned by the bulk reset
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub message: String,
    pub active_removed: usize,
    pub total_removed: usize,
    pub items_freed: usize,
    pub timestamp: String,
}

/// DELETE /api/portaria/limpar?operador={badge} - wipe the reservation table
///
/// Attendant-only; the engine refuses other roles and writes the audit trail.
pub async fn clear(
    State(state): State<ServerState>,
    Query(query): Query<ClearQuery>,
) -> AppResult<ApiResponse<ClearResponse>> {
    let operador = query
        .operador
        .as_deref()
        .ok_or_else(|| AppError::invalid_request("Query parameter 'operador' is required"))?;

    let outcome = state.gateway.clear_by_badge(operador)?;
    Ok(ApiResponse::success(ClearResponse {
        message: format!(
            "Removed {} reservations ({} active), freed {} items",
            outcome.total_removed, outcome.active_removed, outcome.items_freed
        ),
        active_removed: outcome.active_removed,
        total_removed: outcome.total_removed,
        items_freed: outcome.items_freed,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
