//! Route table.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        get_emission_factors, get_room_detail, get_rooms, health_check, publish_event,
        websocket_handler,
    },
    state::AppState,
};

/// Build the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{room_id}", get(get_room_detail))
        .route("/api/emission-factors", get(get_emission_factors))
        .route("/api/events", post(publish_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
