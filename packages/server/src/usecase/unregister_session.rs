//! UseCase: 接続解除処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UnregisterSessionUseCase::execute() メソッド
//! - 全ルームからの退出と identity の破棄
//!
//! ### なぜこのテストが必要か
//! - 切断後の接続に配信され続けないことを保証
//! - 空になったルームが残らないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数ルームに参加中の接続の解除
//! - エッジケース：解除済みの接続の再解除（何もしない）

use std::sync::Arc;

use crate::domain::{ConnectionId, SessionRepository};

/// 接続解除のユースケース
pub struct UnregisterSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl UnregisterSessionUseCase {
    /// 新しい UnregisterSessionUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 接続解除を実行
    ///
    /// # Returns
    ///
    /// 登録されていた接続を解除した場合は `true`、既に解除済みなら `false`
    pub async fn execute(&self, connection_id: &ConnectionId) -> bool {
        match self.repository.unregister(connection_id).await {
            Some(connection) => {
                tracing::info!(
                    "Connection '{}' of user '{}' unregistered (left {} rooms)",
                    connection_id,
                    connection.identity.id,
                    connection.rooms.len()
                );
                true
            }
            None => {
                tracing::debug!("Connection '{}' was already unregistered", connection_id);
                false
            }
        }
    }

    /// 残りの接続数を取得
    pub async fn count_remaining_connections(&self) -> usize {
        self.repository.count_connections().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::RoomId,
        usecase::test_support::{connect, create_test_repository, identity},
    };

    #[tokio::test]
    async fn test_unregister_leaves_every_room() {
        // テスト項目: 解除すると全ルームから抜け、空のルームは消える
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = UnregisterSessionUseCase::new(repository.clone());
        let (a, _rx_a) = connect(&repository, "alice").await;
        let (b, _rx_b) = connect(&repository, "bob").await;
        let webinar = RoomId::new("webinar_1".to_string()).unwrap();
        repository.join(&a, webinar.clone()).await.unwrap();
        repository.join(&b, webinar.clone()).await.unwrap();

        // when (操作):
        let removed = usecase.execute(&a).await;

        // then (期待する結果):
        assert!(removed);
        assert!(
            repository
                .room(&identity("alice").private_room())
                .await
                .is_none()
        );
        assert!(!repository.members_of(&webinar).await.contains(&a));
        assert!(repository.members_of(&webinar).await.contains(&b));
        assert!(repository.identity_of(&a).await.is_none());
        assert_eq!(usecase.count_remaining_connections().await, 1);
    }

    #[tokio::test]
    async fn test_unregister_twice_is_noop() {
        // テスト項目: 解除済みの接続を再度解除しても何も起きない
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = UnregisterSessionUseCase::new(repository.clone());
        let (a, _rx_a) = connect(&repository, "alice").await;
        let (_b, _rx_b) = connect(&repository, "bob").await;
        usecase.execute(&a).await;

        // when (操作):
        let removed_again = usecase.execute(&a).await;

        // then (期待する結果):
        assert!(!removed_again);
        assert_eq!(usecase.count_remaining_connections().await, 1);
    }
}
