//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{AuthError, RepositoryError, ValidationError};

/// 接続登録のエラー
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    /// 認証失敗（接続は拒否される）
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// 登録処理の失敗
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// クライアントから受け取ったイベントの処理エラー
///
/// 送信元の接続にだけ `error` イベントとして返され、ブロードキャストはされない。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InboundError {
    /// 未認証または切断済みの接続からのイベント
    #[error("connection is not authenticated")]
    NotAuthenticated,

    /// ペイロードの検証エラー
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// イベントのエンコード失敗
    #[error("failed to encode event: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for InboundError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value.to_string())
    }
}
