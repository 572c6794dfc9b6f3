//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::error::{AuthError, ValueObjectError};

const USER_ID_MAX_LEN: usize = 100;
const DISPLAY_NAME_MAX_LEN: usize = 100;
const ROOM_ID_MAX_LEN: usize = 128;
const WEBINAR_ID_MAX_LEN: usize = 64;

/// Prefix of the per-user private room.
pub const PRIVATE_ROOM_PREFIX: &str = "user_";

/// Prefix of the shared per-webinar room.
pub const WEBINAR_ROOM_PREFIX: &str = "webinar_";

/// Connection identifier value object.
///
/// Identifies one open websocket, not a user: a user with two browser tabs
/// has two connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Create a ConnectionId from a UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID value.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identifier value object.
///
/// Opaque id issued by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId.
    ///
    /// # Arguments
    ///
    /// * `id` - The user identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the UserId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::UserIdEmpty);
        }
        let len = id.chars().count();
        if len > USER_ID_MAX_LEN {
            return Err(ValueObjectError::UserIdTooLong {
                max: USER_ID_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a new DisplayName. Surrounding whitespace is trimmed.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValueObjectError::DisplayNameEmpty);
        }
        let len = name.chars().count();
        if len > DISPLAY_NAME_MAX_LEN {
            return Err(ValueObjectError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Webinar identifier value object.
///
/// Clients send webinar ids as JSON numbers or strings; both end up here as
/// the trimmed decimal/string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebinarId(String);

impl WebinarId {
    /// Create a new WebinarId.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        let id = id.trim().to_string();
        if id.is_empty() {
            return Err(ValueObjectError::WebinarIdEmpty);
        }
        let len = id.chars().count();
        if len > WEBINAR_ID_MAX_LEN {
            return Err(ValueObjectError::WebinarIdTooLong {
                max: WEBINAR_ID_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WebinarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room identifier value object.
///
/// Represents a named broadcast scope: `user_<id>` (private) or
/// `webinar_<id>` (shared). Other names are accepted as opaque rooms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Create a new RoomId.
    ///
    /// # Arguments
    ///
    /// * `id` - The room identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        let len = id.chars().count();
        if len > ROOM_ID_MAX_LEN {
            return Err(ValueObjectError::RoomIdTooLong {
                max: ROOM_ID_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// The private room of a user: `user_<id>`.
    pub fn private(user_id: &UserId) -> Self {
        Self(format!("{PRIVATE_ROOM_PREFIX}{}", user_id.as_str()))
    }

    /// The shared room of a webinar: `webinar_<id>`.
    pub fn webinar(webinar_id: &WebinarId) -> Self {
        Self(format!("{WEBINAR_ROOM_PREFIX}{}", webinar_id.as_str()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bearer credential presented at connect time.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Create a credential from a raw token. Blank tokens are malformed.
    pub fn new(token: String) -> Result<Self, AuthError> {
        let token = token.trim();
        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(AuthError::MalformedCredential);
        }
        Ok(Self(token.to_string()))
    }

    /// Parse an `Authorization` header value of the form `Bearer <token>`.
    pub fn from_bearer_header(value: &str) -> Result<Self, AuthError> {
        let (scheme, token) = value
            .trim()
            .split_once(' ')
            .ok_or(AuthError::MalformedCredential)?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::MalformedCredential);
        }
        Self::new(token.to_string())
    }

    /// Get the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a shared secret in constant time.
    pub fn matches(&self, secret: &str) -> bool {
        let (a, b) = (self.0.as_bytes(), secret.as_bytes());
        if a.len() != b.len() {
            return false;
        }
        a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}

// never print the token itself
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Activity category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Transportation,
    Energy,
    Diet,
    Waste,
    Water,
    Shopping,
}

impl ActivityCategory {
    /// Every recognized category.
    pub const ALL: [ActivityCategory; 6] = [
        Self::Transportation,
        Self::Energy,
        Self::Diet,
        Self::Waste,
        Self::Water,
        Self::Shopping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transportation => "transportation",
            Self::Energy => "energy",
            Self::Diet => "diet",
            Self::Waste => "waste",
            Self::Water => "water",
            Self::Shopping => "shopping",
        }
    }
}

impl FromStr for ActivityCategory {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ValueObjectError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Period a goal target applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl FromStr for Timeframe {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(ValueObjectError::UnknownTimeframe(s.to_string())),
        }
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Current time.
    pub fn now() -> Self {
        Self(verdant_shared::time::get_utc_timestamp())
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
