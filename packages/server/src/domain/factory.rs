//! Domain factories for creating domain entities and value objects.

use super::ConnectionId;

/// Factory for generating ConnectionId instances.
///
/// Keeps id generation out of the value object itself so tests can build
/// deterministic ids with `ConnectionId::from_uuid`.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}
