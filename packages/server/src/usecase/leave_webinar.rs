//! UseCase: Webinar ルームからの退出
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveWebinarUseCase::execute() メソッド
//! - webinar_left の配信と退出、空になったルームの削除
//!
//! ### なぜこのテストが必要か
//! - 退出通知が退出する本人にも残りのメンバーにも届くことを保証
//! - 参加していない Webinar からの退出が何もしないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加中の Webinar からの退出
//! - エッジケース：最後のメンバーの退出、未参加の Webinar からの退出

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Event, EventKind, RoomId, Scope, SessionRepository, Timestamp, ValidationError,
    WebinarId, WebinarPresencePayload,
};

use super::{error::InboundError, publish_event::PublishEventUseCase};

/// Webinar 退出のユースケース
pub struct LeaveWebinarUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    publisher: PublishEventUseCase,
}

impl LeaveWebinarUseCase {
    /// 新しい LeaveWebinarUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            publisher: PublishEventUseCase::new(repository.clone()),
            repository,
        }
    }

    /// Webinar 退出を実行
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 退出した
    /// * `Ok(false)` - 参加していなかった（何もしない）
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

        if !self
            .repository
            .members_of(&room_id)
            .await
            .contains(connection_id)
        {
            return Ok(false);
        }

        // 本人にも届くよう、退出前に配信する
        let event = Event::from_payload(
            EventKind::WebinarLeft,
            &WebinarPresencePayload {
                webinar_id,
                user_id: identity.id.clone(),
                display_name: identity.display_name.as_str().to_string(),
            },
            Timestamp::now(),
        )?;
        self.publisher
            .execute(&event, &Scope::Room(room_id.clone()))
            .await;

        let left = self.repository.leave(connection_id, &room_id).await;
        if left {
            tracing::info!("User '{}' left {}", identity.id, room_id);
        }
        Ok(left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{connect, create_test_repository, drain, drain_types};

    fn webinar(id: &str) -> RoomId {
        RoomId::webinar(&WebinarId::new(id.to_string()).unwrap())
    }

    #[tokio::test]
    async fn test_leave_webinar_notifies_room_and_leaver() {
        // テスト項目: 退出すると本人と残りのメンバーに webinar_left が届き、メンバーから外れる
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = LeaveWebinarUseCase::new(repository.clone());
        let (a, mut rx_a) = connect(&repository, "alice").await;
        let (b, mut rx_b) = connect(&repository, "bob").await;
        repository.join(&a, webinar("42")).await.unwrap();
        repository.join(&b, webinar("42")).await.unwrap();

        // when (操作):
        let left = usecase.execute(&a, "42".to_string()).await;

        // then (期待する結果):
        assert!(left.unwrap());
        assert_eq!(drain_types(&mut rx_a), vec!["webinar_left"]);
        let to_b = drain(&mut rx_b);
        assert_eq!(to_b.len(), 1);
        assert_eq!(to_b[0]["data"]["user_id"], "alice");
        assert!(!repository.members_of(&webinar("42")).await.contains(&a));
    }

    #[tokio::test]
    async fn test_last_member_leaving_drops_room() {
        // テスト項目: 最後のメンバーが退出するとルームは削除される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = LeaveWebinarUseCase::new(repository.clone());
        let (a, _rx_a) = connect(&repository, "alice").await;
        repository.join(&a, webinar("7")).await.unwrap();

        // when (操作):
        usecase.execute(&a, "7".to_string()).await.unwrap();

        // then (期待する結果):
        assert!(repository.room(&webinar("7")).await.is_none());
        assert!(repository.members_of(&webinar("7")).await.is_empty());
    }

    #[tokio::test]
    async fn test_leave_unjoined_webinar_is_noop() {
        // テスト項目: 参加していない Webinar からの退出は何もせず、誰にも通知されない
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = LeaveWebinarUseCase::new(repository.clone());
        let (a, mut rx_a) = connect(&repository, "alice").await;
        let (b, mut rx_b) = connect(&repository, "bob").await;
        repository.join(&b, webinar("42")).await.unwrap();

        // when (操作):
        let left = usecase.execute(&a, "42".to_string()).await;

        // then (期待する結果):
        assert!(!left.unwrap());
        assert!(drain(&mut rx_a).is_empty());
        assert!(drain(&mut rx_b).is_empty());
        assert!(repository.members_of(&webinar("42")).await.contains(&b));
    }
}
