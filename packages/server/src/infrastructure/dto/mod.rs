//! Data transfer objects for the HTTP API and the websocket protocol.

pub mod http;
pub mod websocket;
