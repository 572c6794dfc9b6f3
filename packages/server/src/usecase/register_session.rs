//! UseCase: 接続登録処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterSessionUseCase::execute() メソッド
//! - 認証情報の検証、接続の登録、プライベートルームへの自動参加
//!
//! ### なぜこのテストが必要か
//! - 認証に失敗した接続が黙って受け入れられないことを保証
//! - 登録直後から User スコープのイベントが届くこと（自動参加）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効なトークンでの接続
//! - 異常系：トークンなし、未知のトークン、重複した接続 ID

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::{
    AuthError, Authenticator, Connection, ConnectionId, Credential, SessionRepository, Timestamp,
    UserIdentity,
};

use super::error::SessionError;

/// 接続登録のユースケース
pub struct RegisterSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// 外部認証（トークン → ユーザー）
    authenticator: Arc<dyn Authenticator>,
}

impl RegisterSessionUseCase {
    /// 新しい RegisterSessionUseCase を作成
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// 接続登録を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 新しい接続の ID
    /// * `credential` - 接続時に提示された認証情報（なければ `None`）
    /// * `sender` - この接続へのメッセージ送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(UserIdentity)` - 登録成功。`user_<id>` ルームに参加済み
    /// * `Err(SessionError)` - 登録失敗。呼び出し側は接続を拒否する
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        credential: Option<Credential>,
        sender: UnboundedSender<String>,
    ) -> Result<UserIdentity, SessionError> {
        // 1. 認証
        let credential = credential.ok_or(AuthError::MissingCredential)?;
        let identity = self.authenticator.validate_credential(&credential).await?;

        // 2. 接続を登録
        let connection = Connection::new(connection_id, identity.clone(), Timestamp::now());
        self.repository.register(connection, sender).await?;

        // 3. プライベートルームへ自動参加
        if let Err(e) = self
            .repository
            .join(&connection_id, identity.private_room())
            .await
        {
            self.repository.unregister(&connection_id).await;
            return Err(e.into());
        }

        tracing::info!(
            "Connection '{}' registered for user '{}'",
            connection_id,
            identity.id
        );
        Ok(identity)
    }
}
