//! Reservation API module
//!
//! Id-based surface used by the desk UI. Lifecycle requests carry the acting
//! user's badge in the body; ownership checks happen in the engine.

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservas", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/usuario/matricula/{badge}", get(handler::list_by_badge))
        .route("/ativas/matricula/{badge}", get(handler::list_active_by_badge))
        .route("/{id}/retirada", patch(handler::check_out))
        .route("/{id}/devolucao", patch(handler::return_item))
}
