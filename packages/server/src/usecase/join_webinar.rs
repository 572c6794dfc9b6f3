//! UseCase: Webinar ルームへの参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinWebinarUseCase::execute() メソッド
//! - webinar_<id> ルームへの参加と webinar_joined の配信
//!
//! ### なぜこのテストが必要か
//! - 参加通知がルームのメンバーにだけ届くことを保証
//! - 再参加が冪等であること（通知は本人への確認応答のみ）を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回参加
//! - エッジケース：同じ Webinar への再参加
//! - 異常系：不正な Webinar ID、未認証の接続

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Event, EventKind, RoomId, Scope, SessionRepository, Timestamp, ValidationError,
    WebinarId, WebinarPresencePayload,
};

use super::{error::InboundError, publish_event::PublishEventUseCase};

/// Webinar 参加のユースケース
pub struct JoinWebinarUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    publisher: PublishEventUseCase,
}

impl JoinWebinarUseCase {
    /// 新しい JoinWebinarUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            publisher: PublishEventUseCase::new(repository.clone()),
            repository,
        }
    }

    /// Webinar 参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 新たに参加した（ルーム全体に webinar_joined を配信）
    /// * `Ok(false)` - 参加済みだった（本人にだけ webinar_joined を返す）
    /// * `Err(InboundError)` - 失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        webinar_id: String,
    ) -> Result<bool, InboundError> {
        let identity = self
            .repository
            .identity_of(connection_id)
            .await
            .ok_or(InboundError::NotAuthenticated)?;
        let webinar_id = WebinarId::new(webinar_id).map_err(ValidationError::InvalidWebinarId)?;
        let room_id = RoomId::webinar(&webinar_id);

        // 検証の後、参加の前に切断された場合は未認証扱い
        let joined = self
            .repository
            .join(connection_id, room_id.clone())
            .await
            .map_err(|_| InboundError::NotAuthenticated)?;

        let event = Event::from_payload(
            EventKind::WebinarJoined,
            &WebinarPresencePayload {
                webinar_id: webinar_id.clone(),
                user_id: identity.id.clone(),
                display_name: identity.display_name.as_str().to_string(),
            },
            Timestamp::now(),
        )?;

        if joined {
            tracing::info!("User '{}' joined {}", identity.id, room_id);
            self.publisher.execute(&event, &Scope::Room(room_id)).await;
        } else {
            self.publisher.reply(connection_id, &event).await;
        }
        Ok(joined)
    }
}
