//! UseCase: 目標の更新
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateGoalUseCase::execute() メソッド
//! - 検証と goal.updated の本人の全接続への配信
//!
//! ### なぜこのテストが必要か
//! - 目標の更新が同じユーザーの他のタブにも反映され、他人には届かないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効な目標
//! - 異常系：未知のカテゴリ、0 以下の目標値、未知の期間、欠けたフィールド

use std::sync::Arc;

use crate::domain::{
    ActivityCategory, ConnectionId, Event, EventKind, GoalPayload, Scope, SessionRepository,
    Timeframe, Timestamp, ValidationError,
};

use super::{error::InboundError, publish_event::PublishEventUseCase};

/// 目標更新のユースケース
pub struct UpdateGoalUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    publisher: PublishEventUseCase,
}

impl UpdateGoalUseCase {
    /// 新しい UpdateGoalUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            publisher: PublishEventUseCase::new(repository.clone()),
            repository,
        }
    }

    /// 目標更新を実行
    ///
    /// # Returns
    ///
    /// * `Ok(GoalPayload)` - 検証済みの目標。本人の全接続に配信済み
    /// * `Err(InboundError)` - 失敗。何も配信していない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        category: Option<String>,
        target: Option<f64>,
        timeframe: Option<String>,
    ) -> Result<GoalPayload, InboundError> {
        let identity = self
            .repository
            .identity_of(connection_id)
            .await
            .ok_or(InboundError::NotAuthenticated)?;

        let category = category.ok_or(ValidationError::MissingField("category"))?;
        let category = category
            .parse::<ActivityCategory>()
            .map_err(|_| ValidationError::UnknownCategory(category))?;
        let target = target.ok_or(ValidationError::MissingField("target"))?;
        if !target.is_finite() || target <= 0.0 {
            return Err(ValidationError::NonPositiveTarget(target).into());
        }
        let timeframe = timeframe.ok_or(ValidationError::MissingField("timeframe"))?;
        let timeframe = timeframe
            .parse::<Timeframe>()
            .map_err(|_| ValidationError::UnknownTimeframe(timeframe))?;

        let goal = GoalPayload {
            user_id: identity.id.clone(),
            category,
            target,
            timeframe,
        };
        let event = Event::from_payload(EventKind::GoalUpdated, &goal, Timestamp::now())?;
        self.publisher
            .execute(&event, &Scope::User(identity.id))
            .await;
        Ok(goal)
    }
}
