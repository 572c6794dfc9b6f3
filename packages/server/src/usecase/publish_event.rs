//! UseCase: イベント配信（ブロードキャスト）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PublishEventUseCase::execute() / reply() メソッド
//! - スコープ（Global / User / Room）から宛先集合への解決と配信
//!
//! ### なぜこのテストが必要か
//! - 宛先解決の誤りは他人へのイベント漏洩に直結する
//! - 1 つの宛先への配信失敗が他の宛先への配信を妨げないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：各スコープへの配信、同一接続への配信順序
//! - 異常系：切断途中（受信側が閉じた）接続への配信
//! - エッジケース：宛先が 0 件のスコープ

use std::sync::Arc;

use crate::domain::{ConnectionId, Event, Scope, SessionRepository};

/// 1 回の publish の結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// スコープから解決された宛先の数
    pub recipients: usize,
    /// 実際に送信キューへ渡せた数
    pub delivered: usize,
}

/// イベント配信のユースケース
///
/// 配信は at-most-once。確認応答も再送もない。
#[derive(Clone)]
pub struct PublishEventUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl PublishEventUseCase {
    /// 新しい PublishEventUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// スコープ内の全接続にイベントを配信
    ///
    /// 配信失敗（切断途中の接続など）はログに残して読み飛ばす。この呼び出し自体は失敗しない。
    ///
    /// # Arguments
    ///
    /// * `event` - 配信するイベント
    /// * `scope` - 配信先スコープ
    pub async fn execute(&self, event: &Event, scope: &Scope) -> PublishReport {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize event {:?}: {}", event.kind, e);
                return PublishReport::default();
            }
        };

        // 1. スコープを宛先集合に解決（この時点のスナップショット）
        let recipients = self.repository.resolve_recipients(scope).await;

        // 2. 宛先ごとに独立して送信
        let mut delivered = 0;
        for recipient in &recipients {
            if recipient.sender.send(payload.clone()).is_err() {
                tracing::warn!(
                    "Failed to deliver {:?} to connection '{}'; skipping",
                    event.kind,
                    recipient.connection_id
                );
                continue;
            }
            delivered += 1;
        }

        tracing::debug!(
            "Published {:?} to {:?}: {}/{} delivered",
            event.kind,
            scope,
            delivered,
            recipients.len()
        );

        PublishReport {
            recipients: recipients.len(),
            delivered,
        }
    }

    /// 1 つの接続にだけイベントを送る（error イベントや確認応答用）
    ///
    /// # Returns
    ///
    /// 送信キューへ渡せた場合は `true`
    pub async fn reply(&self, connection_id: &ConnectionId, event: &Event) -> bool {
        let Some(recipient) = self.repository.recipient(connection_id).await else {
            tracing::debug!("No such connection '{}' for reply", connection_id);
            return false;
        };
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize event {:?}: {}", event.kind, e);
                return false;
            }
        };
        if recipient.sender.send(payload).is_err() {
            tracing::warn!(
                "Failed to deliver {:?} to connection '{}'",
                event.kind,
                connection_id
            );
            return false;
        }
        true
    }
}
