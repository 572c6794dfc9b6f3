//! Repository trait definitions.
//!
//! The domain layer defines the interface; infrastructure provides the
//! implementation (dependency inversion).

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{
    entity::{Connection, Room, UserIdentity},
    error::RepositoryError,
    event::Scope,
    value_object::{ConnectionId, RoomId},
};

/// A resolved delivery target: the connection and its outbound channel.
#[derive(Debug, Clone)]
pub struct Recipient {
    pub connection_id: ConnectionId,
    pub sender: UnboundedSender<String>,
}

/// Session and room-membership store.
///
/// All mutation of connections and rooms goes through this trait.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store an authenticated connection and its outbound channel.
    async fn register(
        &self,
        connection: Connection,
        sender: UnboundedSender<String>,
    ) -> Result<(), RepositoryError>;

    /// Remove a connection from every room and forget it. Idempotent.
    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Connection>;

    async fn identity_of(&self, connection_id: &ConnectionId) -> Option<UserIdentity>;

    async fn connection(&self, connection_id: &ConnectionId) -> Option<Connection>;

    /// Returns `true` if membership changed.
    async fn join(&self, connection_id: &ConnectionId, room_id: RoomId)
    -> Result<bool, RepositoryError>;

    /// Returns `true` if membership changed.
    async fn leave(&self, connection_id: &ConnectionId, room_id: &RoomId) -> bool;

    /// Snapshot copy of a room's members.
    async fn members_of(&self, room_id: &RoomId) -> HashSet<ConnectionId>;

    /// Snapshot of the recipients of a scope.
    async fn resolve_recipients(&self, scope: &Scope) -> Vec<Recipient>;

    async fn recipient(&self, connection_id: &ConnectionId) -> Option<Recipient>;

    async fn rooms(&self) -> Vec<Room>;

    async fn room(&self, room_id: &RoomId) -> Option<Room>;

    async fn count_connections(&self) -> usize;
}
