//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{get_emission_factors, get_room_detail, get_rooms, health_check, publish_event};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
