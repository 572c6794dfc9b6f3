//! Events delivered to connections and the scopes they are addressed to.

use serde::{Deserialize, Serialize};

use super::{
    recommendation::Recommendation,
    value_object::{ActivityCategory, RoomId, Timeframe, Timestamp, UserId, WebinarId},
};

/// Discriminator of an outbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "post.created")]
    PostCreated,
    #[serde(rename = "post.updated")]
    PostUpdated,
    #[serde(rename = "post.deleted")]
    PostDeleted,
    #[serde(rename = "comment.created")]
    CommentCreated,
    #[serde(rename = "comment.updated")]
    CommentUpdated,
    #[serde(rename = "comment.deleted")]
    CommentDeleted,
    #[serde(rename = "like.created")]
    LikeCreated,
    #[serde(rename = "like.deleted")]
    LikeDeleted,
    #[serde(rename = "activity.logged")]
    ActivityLogged,
    #[serde(rename = "recommendation.updated")]
    RecommendationUpdated,
    #[serde(rename = "goal.updated")]
    GoalUpdated,
    #[serde(rename = "challenge.progress")]
    ChallengeProgress,
    #[serde(rename = "new_webinar_message")]
    NewWebinarMessage,
    #[serde(rename = "webinar_joined")]
    WebinarJoined,
    #[serde(rename = "webinar_left")]
    WebinarLeft,
    #[serde(rename = "error")]
    Error,
}

/// An immutable event: kind, payload and creation time.
///
/// Serializes to the wire envelope `{"type", "data", "timestamp"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    pub fn new(kind: EventKind, data: serde_json::Value, timestamp: Timestamp) -> Self {
        Self {
            kind,
            data,
            timestamp,
        }
    }

    /// Build an event from any serializable payload.
    pub fn from_payload<T: Serialize>(
        kind: EventKind,
        payload: &T,
        timestamp: Timestamp,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(kind, serde_json::to_value(payload)?, timestamp))
    }

    /// The private `error` event reported to an originating connection.
    pub fn error(message: impl Into<String>, timestamp: Timestamp) -> Self {
        Self::new(
            EventKind::Error,
            serde_json::json!({ "message": message.into() }),
            timestamp,
        )
    }
}

/// Addressing target of a published event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every registered connection
    Global,
    /// Every connection in `user_<id>`
    User(UserId),
    /// Every connection in the named room
    Room(RoomId),
}

impl Scope {
    /// The room this scope resolves through, if any.
    pub fn room_id(&self) -> Option<RoomId> {
        match self {
            Self::Global => None,
            Self::User(user_id) => Some(RoomId::private(user_id)),
            Self::Room(room_id) => Some(room_id.clone()),
        }
    }
}

/// Payload of `webinar_joined` / `webinar_left`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebinarPresencePayload {
    pub webinar_id: WebinarId,
    pub user_id: UserId,
    pub display_name: String,
}

/// Payload of `new_webinar_message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebinarMessagePayload {
    pub webinar_id: WebinarId,
    pub sender_id: UserId,
    pub sender_name: String,
    pub message_text: String,
}

/// Payload of `goal.updated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPayload {
    pub user_id: UserId,
    pub category: ActivityCategory,
    pub target: f64,
    pub timeframe: Timeframe,
}

/// Payload of `recommendation.updated`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationPayload {
    pub user_id: UserId,
    pub category: ActivityCategory,
    pub recommendations: &'static [Recommendation],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_to_envelope() {
        // テスト項目: Event は {"type", "data", "timestamp"} 形式にシリアライズされる
        // given (前提条件):
        let event = Event::new(
            EventKind::PostCreated,
            serde_json::json!({ "id": 1 }),
            Timestamp::new(1000),
        );

        // when (操作):
        let json = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({ "type": "post.created", "data": { "id": 1 }, "timestamp": 1000 })
        );
    }

    #[test]
    fn test_event_kind_wire_names() {
        // テスト項目: イベント種別のワイヤー上の名前
        // then (期待する結果):
        let name = |kind: EventKind| serde_json::to_value(kind).unwrap();
        assert_eq!(name(EventKind::ActivityLogged), "activity.logged");
        assert_eq!(name(EventKind::NewWebinarMessage), "new_webinar_message");
        assert_eq!(name(EventKind::WebinarJoined), "webinar_joined");
        assert_eq!(name(EventKind::Error), "error");
    }

    #[test]
    fn test_error_event_carries_message() {
        // テスト項目: error イベントは message を持つ
        // when (操作):
        let event = Event::error("quantity must be positive", Timestamp::new(5));

        // then (期待する結果):
        assert_eq!(event.kind, EventKind::Error);
        assert_eq!(event.data["message"], "quantity must be positive");
    }

    #[test]
    fn test_scope_room_id() {
        // テスト項目: スコープから解決に使うルーム ID が得られる
        // given (前提条件):
        let user_id = UserId::new("7".to_string()).unwrap();
        let room_id = RoomId::new("webinar_1".to_string()).unwrap();

        // then (期待する結果):
        assert_eq!(Scope::Global.room_id(), None);
        assert_eq!(
            Scope::User(user_id).room_id(),
            Some(RoomId::new("user_7".to_string()).unwrap())
        );
        assert_eq!(Scope::Room(room_id.clone()).room_id(), Some(room_id));
    }
}
