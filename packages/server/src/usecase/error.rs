//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("group '{0}' not found")]
    GroupNotFound(String),

    #[error("sender is not a member of group '{0}'")]
    NotGroupMember(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// 履歴取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetMessagesError {
    #[error("group '{0}' not found")]
    GroupNotFound(String),

    #[error("user is not a member of group '{0}'")]
    NotGroupMember(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// グループ作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateGroupError {
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error("name and members are required")]
    NoMembers,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<RepositoryError> for SendMessageError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::GroupNotFound(id) => Self::GroupNotFound(id),
            other => Self::Repository(other),
        }
    }
}

impl From<RepositoryError> for GetMessagesError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::GroupNotFound(id) => Self::GroupNotFound(id),
            other => Self::Repository(other),
        }
    }
}
