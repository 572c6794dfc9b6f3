//! Membership aggregate: connections, rooms and the relation between them.
//!
//! Both directions of the connection/room relation live here and are only
//! changed together, so `room.members` contains C exactly when
//! `connections[C].rooms` contains the room.

use std::collections::{HashMap, HashSet};

use super::{
    entity::{Connection, Room, UserIdentity},
    error::RepositoryError,
    event::Scope,
    value_object::{ConnectionId, RoomId},
};

#[derive(Debug, Default)]
pub struct MembershipRegistry {
    connections: HashMap<ConnectionId, Connection>,
    rooms: HashMap<RoomId, Room>,
}

impl MembershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection. Its pre-set room memberships are ignored; use
    /// [`join`](Self::join) afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ConnectionAlreadyRegistered` on a duplicate id.
    pub fn register(&mut self, mut connection: Connection) -> Result<(), RepositoryError> {
        if self.connections.contains_key(&connection.id) {
            return Err(RepositoryError::ConnectionAlreadyRegistered(
                connection.id.to_string(),
            ));
        }
        connection.rooms.clear();
        self.connections.insert(connection.id, connection);
        Ok(())
    }

    /// Remove a connection from every room, then forget it.
    ///
    /// Returns the removed connection (with the rooms it was in), or `None`
    /// if it was not registered.
    pub fn unregister(&mut self, connection_id: &ConnectionId) -> Option<Connection> {
        let connection = self.connections.remove(connection_id)?;
        for room_id in &connection.rooms {
            self.remove_member(room_id, connection_id);
        }
        Some(connection)
    }

    pub fn connection(&self, connection_id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(connection_id)
    }

    pub fn identity_of(&self, connection_id: &ConnectionId) -> Option<&UserIdentity> {
        self.connections.get(connection_id).map(|c| &c.identity)
    }

    /// Add a connection to a room, creating the room on first join.
    ///
    /// Returns `true` if membership changed, `false` if it already was a member.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ConnectionNotFound` for an unregistered connection.
    pub fn join(
        &mut self,
        connection_id: &ConnectionId,
        room_id: RoomId,
    ) -> Result<bool, RepositoryError> {
        let connection = self
            .connections
            .get_mut(connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.to_string()))?;
        if !connection.rooms.insert(room_id.clone()) {
            return Ok(false);
        }
        self.rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id))
            .members
            .insert(*connection_id);
        Ok(true)
    }

    /// Remove a connection from a room; drops the room once empty.
    ///
    /// Returns `true` if membership changed. Unknown connections or rooms
    /// are a no-op.
    pub fn leave(&mut self, connection_id: &ConnectionId, room_id: &RoomId) -> bool {
        let Some(connection) = self.connections.get_mut(connection_id) else {
            return false;
        };
        if !connection.rooms.remove(room_id) {
            return false;
        }
        self.remove_member(room_id, connection_id);
        true
    }

    /// Snapshot of the members of a room. Unknown rooms are empty.
    pub fn members_of(&self, room_id: &RoomId) -> HashSet<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|room| room.members.clone())
            .unwrap_or_default()
    }

    /// Concrete recipient set of a scope at this instant.
    pub fn resolve(&self, scope: &Scope) -> HashSet<ConnectionId> {
        match scope.room_id() {
            None => self.connections.keys().copied().collect(),
            Some(room_id) => self.members_of(&room_id),
        }
    }

    pub fn room(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn remove_member(&mut self, room_id: &RoomId, connection_id: &ConnectionId) {
        if let Some(room) = self.rooms.get_mut(room_id) {
            room.members.remove(connection_id);
            if room.is_empty() {
                self.rooms.remove(room_id);
            }
        }
    }
}
