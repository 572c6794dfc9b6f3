//! WebSocket message DTOs.
//!
//! Inbound frames are JSON objects tagged by `type`. Outbound frames are the
//! serialized domain `Event` envelope; `OutboundMessage` is its loosely typed
//! mirror for clients.

use serde::{Deserialize, Serialize};

/// Webinar id as sent by clients: a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WebinarIdDto {
    Number(u64),
    Text(String),
}

impl WebinarIdDto {
    pub fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

impl From<&str> for WebinarIdDto {
    fn from(value: &str) -> Self {
        match value.parse::<u64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(value.to_string()),
        }
    }
}

/// Events accepted from a connected client.
///
/// Payload fields are optional so that a missing field is reported as a
/// validation error naming the field, not as an opaque parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    LogActivity {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quantity: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    JoinWebinar {
        webinar_id: WebinarIdDto,
    },
    LeaveWebinar {
        webinar_id: WebinarIdDto,
    },
    WebinarMessage {
        webinar_id: WebinarIdDto,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_text: Option<String>,
    },
    UpdateGoal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeframe: Option<String>,
    },
}

impl InboundMessage {
    /// Wire name of the message type, for logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::LogActivity { .. } => "log_activity",
            Self::JoinWebinar { .. } => "join_webinar",
            Self::LeaveWebinar { .. } => "leave_webinar",
            Self::WebinarMessage { .. } => "webinar_message",
            Self::UpdateGoal { .. } => "update_goal",
        }
    }
}

/// An outbound event as seen by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub r#type: String,
    #[serde(default)]
    pub data: serde_json::Value,
    pub timestamp: i64,
}
