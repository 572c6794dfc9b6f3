//! UseCase: 活動記録の受付と影響値の付与
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - IngestActivityUseCase::execute() メソッド
//! - 検証、排出係数による影響値計算、activity.logged と recommendation.updated の配信
//!
//! ### なぜこのテストが必要か
//! - 検証エラー時に何も配信されないことを保証
//! - 影響値の計算（未知の単位は係数 1）を固定する
//! - 推奨の更新が本人の接続にだけ届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：既知の (category, unit)
//! - エッジケース：未知の (category, unit)
//! - 異常系：負の数量、未認証の接続

use std::sync::Arc;

use crate::domain::{
    ActivityReport, ConnectionId, EmissionFactorTable, EnrichedActivity, Event, EventKind,
    RecommendationPayload, Scope, SessionRepository, Timestamp, recommendations_for,
};

use super::{error::InboundError, publish_event::PublishEventUseCase};

/// 活動記録のユースケース
pub struct IngestActivityUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// 排出係数表（起動時に注入、読み取り専用）
    factors: Arc<EmissionFactorTable>,
    publisher: PublishEventUseCase,
}

impl IngestActivityUseCase {
    /// 新しい IngestActivityUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>, factors: Arc<EmissionFactorTable>) -> Self {
        Self {
            publisher: PublishEventUseCase::new(repository.clone()),
            repository,
            factors,
        }
    }

    /// 活動記録を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信元の接続
    /// * `report` - クライアントから受け取った活動レポート
    ///
    /// # Returns
    ///
    /// * `Ok(EnrichedActivity)` - 影響値を付与した活動。配信済み
    /// * `Err(InboundError)` - 検証失敗。何も配信していない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        report: ActivityReport,
    ) -> Result<EnrichedActivity, InboundError> {
        // 1. 送信元の identity を確認
        let identity = self
            .repository
            .identity_of(connection_id)
            .await
            .ok_or(InboundError::NotAuthenticated)?;

        // 2. 検証と影響値の計算
        let activity = report.validate()?;
        let enriched = activity.annotate(&identity, &self.factors, Timestamp::now());

        // 3. 配信するイベントを先に組み立てる（途中で失敗したら何も配信しない）
        let logged = Event::from_payload(EventKind::ActivityLogged, &enriched, enriched.timestamp)?;
        let recommendation = Event::from_payload(
            EventKind::RecommendationUpdated,
            &RecommendationPayload {
                user_id: identity.id.clone(),
                category: enriched.category,
                recommendations: recommendations_for(enriched.category),
            },
            enriched.timestamp,
        )?;

        // 4. 公開フィードへ、その後本人へ推奨を配信
        self.publisher.execute(&logged, &Scope::Global).await;
        self.publisher
            .execute(&recommendation, &Scope::User(identity.id.clone()))
            .await;

        tracing::info!(
            "User '{}' logged {} {} {} (impact {:.3})",
            identity.id,
            enriched.quantity,
            enriched.unit,
            enriched.category,
            enriched.impact
        );
        Ok(enriched)
    }
}
