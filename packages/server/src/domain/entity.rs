//! Core domain models for the realtime layer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::value_object::{ConnectionId, DisplayName, RoomId, Timestamp, UserId};

/// A user as resolved by the auth collaborator. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub display_name: DisplayName,
}

impl UserIdentity {
    pub fn new(id: UserId, display_name: DisplayName) -> Self {
        Self { id, display_name }
    }

    /// The private room every connection of this user auto-joins.
    pub fn private_room(&self) -> RoomId {
        RoomId::private(&self.id)
    }
}

/// An authenticated, open connection.
///
/// The identity is fixed for the lifetime of the connection; only the room
/// set changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub identity: UserIdentity,
    /// Rooms this connection currently belongs to
    pub rooms: HashSet<RoomId>,
    /// Timestamp when the connection was registered
    pub connected_at: Timestamp,
}

impl Connection {
    /// Create a connection with no room memberships yet.
    pub fn new(id: ConnectionId, identity: UserIdentity, connected_at: Timestamp) -> Self {
        Self {
            id,
            identity,
            rooms: HashSet::new(),
            connected_at,
        }
    }

    pub fn is_member_of(&self, room_id: &RoomId) -> bool {
        self.rooms.contains(room_id)
    }
}

/// A named, ephemeral set of connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub members: HashSet<ConnectionId>,
}

impl Room {
    /// Create a new empty room with the given ID
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            members: HashSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
