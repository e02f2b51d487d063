//! Front Desk API module
//!
//! Badge-first flows for the desk terminal: scan a badge, then drive the
//! lifecycle from the scan result. Also carries the dashboard counters and
//! the audited bulk reset.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/portaria", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/cracha/{badge}", get(handler::read_badge))
        .route(
            "/cracha/{badge}/reservas-ativas",
            get(handler::active_for_badge),
        )
        .route("/cracha/{badge}/reservar/{item_id}", post(handler::reserve))
        .route(
            "/cracha/{badge}/retirar/{reservation_id}",
            post(handler::check_out),
        )
        .route(
            "/cracha/{badge}/devolver/{reservation_id}",
            post(handler::return_item),
        )
        .route("/dashboard", get(handler::dashboard))
        .route("/limpar", delete(handler::clear))
}
