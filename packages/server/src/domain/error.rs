//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("invalid {kind}: '{value}'")]
    InvalidId { kind: &'static str, value: String },

    #[error("message text or image is required")]
    EmptyMessageBody,

    #[error("invalid group name: '{0}'")]
    InvalidGroupName(String),
}

/// Repository（外部ストア）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("group '{0}' not found")]
    GroupNotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
