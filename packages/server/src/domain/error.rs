//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// Display name validation error
    #[error("DisplayName cannot be empty")]
    DisplayNameEmpty,

    /// Display name too long error
    #[error("DisplayName cannot exceed {max} characters (got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    /// WebinarId validation error
    #[error("WebinarId cannot be empty")]
    WebinarIdEmpty,

    /// WebinarId too long error
    #[error("WebinarId cannot exceed {max} characters (got {actual})")]
    WebinarIdTooLong { max: usize, actual: usize },

    /// Token in a user record that no credential can ever match
    #[error("token of user '{0}' is blank or contains whitespace")]
    TokenMalformed(String),

    /// Unrecognized activity category
    #[error("unknown activity category: {0}")]
    UnknownCategory(String),

    /// Unrecognized goal timeframe
    #[error("unknown timeframe: {0}")]
    UnknownTimeframe(String),
}

/// Errors raised while resolving a credential to a user identity.
///
/// Any of these refuses the connection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("credential is missing")]
    MissingCredential,

    #[error("credential is malformed")]
    MalformedCredential,

    #[error("credential does not resolve to a known user")]
    UnknownCredential,
}

/// Errors for malformed inbound event payloads.
///
/// These are reported to the originating connection only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("unknown activity category: {0}")]
    UnknownCategory(String),

    #[error("quantity must be a positive number (got {0})")]
    NonPositiveQuantity(f64),

    #[error("target must be a positive number (got {0})")]
    NonPositiveTarget(f64),

    #[error("unknown timeframe: {0}")]
    UnknownTimeframe(String),

    #[error("description cannot exceed {max} characters (got {actual})")]
    DescriptionTooLong { max: usize, actual: usize },

    #[error("message cannot be empty")]
    MessageEmpty,

    #[error("message cannot exceed {max} characters (got {actual})")]
    MessageTooLong { max: usize, actual: usize },

    #[error("invalid webinar id: {0}")]
    InvalidWebinarId(ValueObjectError),

    #[error("not a member of webinar {0}")]
    NotWebinarMember(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Errors related to the session/membership store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A connection with the same id is already registered
    #[error("connection '{0}' is already registered")]
    ConnectionAlreadyRegistered(String),

    /// The connection is not (or no longer) registered
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),
}
