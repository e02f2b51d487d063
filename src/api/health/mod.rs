//! Health check route
//!
//! # Routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /health | GET | liveness probe with runtime counters |
//!
//! # Response example
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "epoch": "3b2f0d9e-...",
//!   "uptimeSeconds": 42,
//!   "counts": { "users": 3, "items": 12, "reservations": 7, "activeReservations": 2 }
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::time::SystemTime;

use crate::core::ServerState;
use crate::db::repository::ReservationRepository;

/// Health route, served at the root rather than under /api
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// Liveness response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Status (always "healthy" while the process serves requests)
    status: &'static str,
    /// Version number
    version: &'static str,
    /// Store epoch; a new value means the process restarted and the
    /// in-memory store started over
    epoch: String,
    /// Seconds since startup
    uptime_seconds: u64,
    /// Entity counters
    counts: EntityCounts,
}

/// Store population counters
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCounts {
    users: usize,
    items: usize,
    reservations: usize,
    active_reservations: usize,
}

// Server start time (lazily initialized)
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Basic liveness check
///
/// Carries the store epoch so clients can detect a restart: ids issued
/// before a new epoch no longer resolve.
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let store = state.store.clone();
    let active = ReservationRepository::new(store.clone()).count_active();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        epoch: state.engine.epoch().to_string(),
        uptime_seconds: uptime_seconds(),
        counts: EntityCounts {
            users: store.user_count(),
            items: store.item_count(),
            reservations: store.reservation_count(),
            active_reservations: active,
        },
    })
}
