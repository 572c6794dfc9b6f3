//! UseCase: Webinar へのメッセージ送信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendWebinarMessageUseCase::execute() メソッド
//! - メンバーシップ確認と new_webinar_message のルームへの配信
//!
//! ### なぜこのテストが必要か
//! - メッセージがルーム外の接続に漏れないことを保証
//! - 参加していない Webinar への投稿を拒否することを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：A と B が webinar_42 に参加し、A が "hi" を送る。C には届かない
//! - 異常系：未参加の Webinar への送信、空のメッセージ、長すぎるメッセージ

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Event, EventKind, RoomId, Scope, SessionRepository, Timestamp, ValidationError,
    WebinarId, WebinarMessagePayload,
};

use super::{
    error::InboundError,
    publish_event::{PublishEventUseCase, PublishReport},
};

const MESSAGE_MAX_LEN: usize = 2000;

/// Webinar メッセージ送信のユースケース
pub struct SendWebinarMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    publisher: PublishEventUseCase,
}

impl SendWebinarMessageUseCase {
    /// 新しい SendWebinarMessageUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            publisher: PublishEventUseCase::new(repository.clone()),
            repository,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信元の接続
    /// * `webinar_id` - 送信先の Webinar ID
    /// * `message_text` - 本文（欠けていれば `None`）
    ///
    /// # Returns
    ///
    /// * `Ok(PublishReport)` - ルームへの配信結果
    /// * `Err(InboundError)` - 失敗。何も配信していない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        webinar_id: String,
        message_text: Option<String>,
    ) -> Result<PublishReport, InboundError> {
        let identity = self
            .repository
            .identity_of(connection_id)
            .await
            .ok_or(InboundError::NotAuthenticated)?;
        let webinar_id = WebinarId::new(webinar_id).map_err(ValidationError::InvalidWebinarId)?;

        let message_text = message_text.ok_or(ValidationError::MissingField("message_text"))?;
        let message_text = message_text.trim().to_string();
        if message_text.is_empty() {
            return Err(ValidationError::MessageEmpty.into());
        }
        let len = message_text.chars().count();
        if len > MESSAGE_MAX_LEN {
            return Err(ValidationError::MessageTooLong {
                max: MESSAGE_MAX_LEN,
                actual: len,
            }
            .into());
        }

        let room_id = RoomId::webinar(&webinar_id);
        if !self
            .repository
            .members_of(&room_id)
            .await
            .contains(connection_id)
        {
            return Err(ValidationError::NotWebinarMember(webinar_id.to_string()).into());
        }

        let event = Event::from_payload(
            EventKind::NewWebinarMessage,
            &WebinarMessagePayload {
                webinar_id,
                sender_id: identity.id.clone(),
                sender_name: identity.display_name.as_str().to_string(),
                message_text,
            },
            Timestamp::now(),
        )?;
        let report = self.publisher.execute(&event, &Scope::Room(room_id)).await;
        Ok(report)
    }
}
