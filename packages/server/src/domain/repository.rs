//! Repository trait 定義
//!
//! ドメイン層が必要とする外部ストアへのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ストアはメッセージの永続性について唯一の権威であり、
//! リアルタイム配信（リレー）はストアへの書き込みが完了した後にのみ行われます。

use async_trait::async_trait;

use super::{
    entity::{Group, Message, NewMessage},
    error::RepositoryError,
    value_object::{GroupId, GroupName, UserId},
};

/// Message Repository trait
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// メッセージを永続化し、ID と作成時刻が付与されたメッセージを返す
    async fn append(&self, message: NewMessage) -> Result<Message, RepositoryError>;

    /// 2 人のユーザー間のダイレクトメッセージ履歴を取得（古い順）
    async fn direct_history(&self, a: &UserId, b: &UserId)
    -> Result<Vec<Message>, RepositoryError>;

    /// グループのメッセージ履歴を取得（古い順）
    async fn group_history(&self, group_id: &GroupId) -> Result<Vec<Message>, RepositoryError>;
}

/// Group Repository trait
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// グループを作成
    async fn create(
        &self,
        name: GroupName,
        creator: UserId,
        member_ids: Vec<UserId>,
    ) -> Result<Group, RepositoryError>;

    /// グループを取得
    async fn find(&self, group_id: &GroupId) -> Result<Group, RepositoryError>;

    /// グループのメンバー一覧を取得
    async fn members(&self, group_id: &GroupId) -> Result<Vec<UserId>, RepositoryError> {
        Ok(self.find(group_id).await?.members)
    }
}
