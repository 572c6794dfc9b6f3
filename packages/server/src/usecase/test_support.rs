//! UseCase テスト用の共通ヘルパー

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{
        Connection, ConnectionId, ConnectionIdFactory, DisplayName, SessionRepository, Timestamp,
        UserId, UserIdentity,
    },
    infrastructure::repository::InMemorySessionRepository,
};

pub fn create_test_repository() -> Arc<InMemorySessionRepository> {
    Arc::new(InMemorySessionRepository::new())
}

pub fn identity(id: &str) -> UserIdentity {
    UserIdentity::new(
        UserId::new(id.to_string()).unwrap(),
        DisplayName::new(format!("{id} name")).unwrap(),
    )
}

/// 登録してプライベートルームに参加させた接続を作る
pub async fn connect(
    repository: &Arc<InMemorySessionRepository>,
    user: &str,
) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
    let connection_id = ConnectionIdFactory::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    let identity = identity(user);
    let private_room = identity.private_room();
    repository
        .register(
            Connection::new(connection_id, identity, Timestamp::new(0)),
            tx,
        )
        .await
        .unwrap();
    repository.join(&connection_id, private_room).await.unwrap();
    (connection_id, rx)
}

/// 受信済みのイベントをすべて取り出す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<serde_json::Value> {
    let mut events = Vec::new();
    while let Ok(text) = rx.try_recv() {
        events.push(serde_json::from_str(&text).unwrap());
    }
    events
}

/// 受信済みイベントの type 一覧
pub fn drain_types(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    drain(rx)
        .into_iter()
        .map(|event| event["type"].as_str().unwrap().to_string())
        .collect()
}
