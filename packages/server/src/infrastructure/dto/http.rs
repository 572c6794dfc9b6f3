//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{EventKind, RoomId, Scope, UserId, ValueObjectError};

/// Room summary for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub member_count: usize,
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub members: Vec<MemberDetailDto>,
}

/// Member detail for room detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub connection_id: String,
    pub user_id: String,
    pub display_name: String,
    pub connected_at: String, // ISO 8601
}

/// Target scope in a publish request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScopeDto {
    Global,
    User { user_id: String },
    Room { room_id: String },
}

impl TryFrom<ScopeDto> for Scope {
    type Error = ValueObjectError;

    fn try_from(value: ScopeDto) -> Result<Self, Self::Error> {
        Ok(match value {
            ScopeDto::Global => Scope::Global,
            ScopeDto::User { user_id } => Scope::User(UserId::try_from(user_id)?),
            ScopeDto::Room { room_id } => Scope::Room(RoomId::try_from(room_id)?),
        })
    }
}

/// Body of `POST /api/events`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequestDto {
    pub r#type: EventKind,
    #[serde(default)]
    pub data: serde_json::Value,
    pub scope: ScopeDto,
}

/// Response of `POST /api/events`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponseDto {
    pub recipients: usize,
    pub delivered: usize,
}
