//! Domain layer for the realtime event server.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod activity;
pub mod authenticator;
pub mod emission;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod recommendation;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use activity::{ActivityReport, EnrichedActivity, ValidActivity};
pub use authenticator::Authenticator;
pub use emission::{DEFAULT_FACTOR, EmissionFactorTable};
pub use entity::{Connection, Room, UserIdentity};
pub use error::{AuthError, RepositoryError, ValidationError, ValueObjectError};
pub use event::{
    Event, EventKind, GoalPayload, RecommendationPayload, Scope, WebinarMessagePayload,
    WebinarPresencePayload,
};
pub use factory::ConnectionIdFactory;
pub use recommendation::{Recommendation, recommendations_for};
pub use registry::MembershipRegistry;
pub use repository::{Recipient, SessionRepository};
pub use value_object::{
    ActivityCategory, ConnectionId, Credential, DisplayName, RoomId, Timeframe, Timestamp, UserId,
    WebinarId,
};
