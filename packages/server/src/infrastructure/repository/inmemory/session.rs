//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! 接続・ルームの関係は `MembershipRegistry` が保持し、WebSocket 送信チャンネルは
//! 同じロックの下で接続 ID ごとに保持します。
//!
//! ## 制約
//!
//! 状態はプロセス内に閉じています。複数プロセスで運用する場合、別プロセスに接続している
//! クライアントにはイベントが届きません（外部 pub/sub は対象外）。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::domain::{
    Connection, ConnectionId, MembershipRegistry, Recipient, RepositoryError, Room, RoomId, Scope,
    SessionRepository, UserIdentity,
};

#[derive(Default)]
struct Inner {
    /// 接続・ルームの集約
    registry: MembershipRegistry,
    /// 接続ごとの送信チャンネル
    senders: HashMap<ConnectionId, UnboundedSender<String>>,
}

impl Inner {
    fn recipients<'a>(&self, ids: impl IntoIterator<Item = &'a ConnectionId>) -> Vec<Recipient> {
        ids.into_iter()
            .filter_map(|id| {
                self.senders.get(id).map(|sender| Recipient {
                    connection_id: *id,
                    sender: sender.clone(),
                })
            })
            .collect()
    }
}

/// インメモリ Session Repository 実装
///
/// 単一の Mutex で集約と送信チャンネルをまとめて保護するため、
/// 双方向のメンバーシップ整合性が途中状態で観測されることはありません。
#[derive(Default)]
pub struct InMemorySessionRepository {
    inner: Mutex<Inner>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn register(
        &self,
        connection: Connection,
        sender: UnboundedSender<String>,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().await;
        let connection_id = connection.id;
        inner.registry.register(connection)?;
        inner.senders.insert(connection_id, sender);
        Ok(())
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let mut inner = self.inner.lock().await;
        inner.senders.remove(connection_id);
        inner.registry.unregister(connection_id)
    }

    async fn identity_of(&self, connection_id: &ConnectionId) -> Option<UserIdentity> {
        let inner = self.inner.lock().await;
        inner.registry.identity_of(connection_id).cloned()
    }

    async fn connection(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let inner = self.inner.lock().await;
        inner.registry.connection(connection_id).cloned()
    }

    async fn join(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
    ) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.lock().await;
        inner.registry.join(connection_id, room_id)
    }

    async fn leave(&self, connection_id: &ConnectionId, room_id: &RoomId) -> bool {
        let mut inner = self.inner.lock().await;
        inner.registry.leave(connection_id, room_id)
    }

    async fn members_of(&self, room_id: &RoomId) -> HashSet<ConnectionId> {
        let inner = self.inner.lock().await;
        inner.registry.members_of(room_id)
    }

    async fn resolve_recipients(&self, scope: &Scope) -> Vec<Recipient> {
        let inner = self.inner.lock().await;
        let ids = inner.registry.resolve(scope);
        inner.recipients(&ids)
    }

    async fn recipient(&self, connection_id: &ConnectionId) -> Option<Recipient> {
        let inner = self.inner.lock().await;
        inner.recipients([connection_id]).pop()
    }

    async fn rooms(&self) -> Vec<Room> {
        let inner = self.inner.lock().await;
        let mut rooms: Vec<Room> = inner.registry.rooms().cloned().collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }

    async fn room(&self, room_id: &RoomId) -> Option<Room> {
        let inner = self.inner.lock().await;
        inner.registry.room(room_id).cloned()
    }

    async fn count_connections(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.registry.connection_count()
    }
}
