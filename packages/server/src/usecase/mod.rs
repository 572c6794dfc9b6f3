//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod error;
pub mod ingest_activity;
pub mod join_webinar;
pub mod leave_webinar;
pub mod publish_event;
pub mod register_session;
pub mod send_webinar_message;
pub mod unregister_session;
pub mod update_goal;

#[cfg(test)]
mod test_support;

pub use error::{InboundError, SessionError};
pub use ingest_activity::IngestActivityUseCase;
pub use join_webinar::JoinWebinarUseCase;
pub use leave_webinar::LeaveWebinarUseCase;
pub use publish_event::{PublishEventUseCase, PublishReport};
pub use register_session::RegisterSessionUseCase;
pub use send_webinar_message::SendWebinarMessageUseCase;
pub use unregister_session::UnregisterSessionUseCase;
pub use update_goal::UpdateGoalUseCase;
