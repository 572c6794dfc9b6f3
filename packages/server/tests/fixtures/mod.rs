//! Shared fixtures for the integration tests.
//!
//! Each test starts its own server on an ephemeral port so tests can run in
//! parallel without port collisions.

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::{net::TcpListener, net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{Message, client::IntoClientRequest, http::HeaderValue},
};
use verdant_server::{
    ServerConfig, domain::EmissionFactorTable, infrastructure::auth::UserRecord,
    ui::{create_router, state::AppState},
};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const PUBLISH_TOKEN: &str = "publisher-secret";

/// Users known to every test server: (token, id, display name)
pub const USERS: [(&str, &str, &str); 3] = [
    ("token-a", "alice", "Alice"),
    ("token-b", "bob", "Bob"),
    ("token-c", "carol", "Carol"),
];

pub struct TestServer {
    addr: std::net::SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server without a publish token.
    pub async fn start() -> Self {
        Self::start_with_publish_token(None).await
    }

    pub async fn start_with_publish_token(publish_token: Option<&str>) -> Self {
        let config = ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            users: USERS
                .iter()
                .map(|(token, id, name)| UserRecord {
                    token: token.to_string(),
                    id: id.to_string(),
                    display_name: name.to_string(),
                })
                .collect(),
            emission_factors: EmissionFactorTable::default(),
            publish_token: publish_token.map(str::to_string),
        };
        let state = Arc::new(AppState::from_config(config).expect("Failed to build state"));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, create_router(state))
                .await
                .expect("Test server failed");
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Connect with `Authorization: Bearer <token>`.
    pub async fn connect(&self, token: &str) -> WsStream {
        let mut request = self
            .ws_url()
            .into_client_request()
            .expect("Failed to build request");
        request.headers_mut().insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {token}")).expect("Invalid header"),
        );
        let (ws, _) = connect_async(request).await.expect("Failed to connect");
        ws
    }

    /// Connect with `?token=<token>`.
    pub async fn connect_with_query(&self, token: &str) -> WsStream {
        let (ws, _) = connect_async(format!("{}?token={}", self.ws_url(), token))
            .await
            .expect("Failed to connect");
        ws
    }

    /// Poll `/api/rooms` until `predicate` holds or a second has passed.
    pub async fn wait_for_rooms(&self, predicate: impl Fn(&[Value]) -> bool) -> Vec<Value> {
        let client = reqwest::Client::new();
        let mut rooms = Vec::new();
        for _ in 0..50 {
            rooms = client
                .get(format!("{}/api/rooms", self.base_url()))
                .send()
                .await
                .expect("Failed to send request")
                .json::<Vec<Value>>()
                .await
                .expect("Failed to parse JSON");
            if predicate(&rooms) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        rooms
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Send a JSON value as a text frame.
pub async fn send_json(ws: &mut WsStream, value: Value) {
    ws.send(Message::text(value.to_string()))
        .await
        .expect("Failed to send frame");
}

/// Wait for the next event, failing after two seconds.
pub async fn next_event(ws: &mut WsStream) -> Value {
    let deadline = Duration::from_secs(2);
    loop {
        let msg = tokio::time::timeout(deadline, ws.next())
            .await
            .expect("Timed out waiting for an event")
            .expect("Stream closed")
            .expect("WebSocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).expect("Event is not JSON");
        }
    }
}

/// Assert that nothing arrives within a short window.
pub async fn assert_no_event(ws: &mut WsStream) {
    if let Ok(Some(Ok(Message::Text(text)))) =
        tokio::time::timeout(Duration::from_millis(200), ws.next()).await
    {
        panic!("Unexpected event: {text}");
    }
}

pub fn room_ids(rooms: &[Value]) -> Vec<String> {
    rooms
        .iter()
        .filter_map(|room| room["id"].as_str().map(str::to_string))
        .collect()
}
