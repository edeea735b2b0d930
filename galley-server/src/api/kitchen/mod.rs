//! Kitchen Orders API Module
//!
//! REST endpoints for the kitchen work queue: queue listing, single-order
//! detail, status transitions, staff assignment and daily stats.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen", kitchen_routes())
}

fn kitchen_routes() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::list))
        .route("/orders/{id}", get(handler::get_by_id))
        .route("/orders/{id}/status", put(handler::update_status))
        .route("/orders/{id}/assign", put(handler::assign))
        .route("/stats", get(handler::stats))
}
