//! ConnectionRegistry trait 定義
//!
//! ユーザー ID とライブ接続の対応表。
//! レジストリに存在するユーザーが「オンライン」、存在しないユーザーが「オフライン」。
//!
//! 1 ユーザーにつき接続は高々 1 つ（後から接続した方が勝つ）。

use async_trait::async_trait;

use super::value_object::{ConnectionId, UserId};

/// ConnectionRegistry trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// ユーザーと接続を対応付ける（既存の対応は上書き）
    ///
    /// 上書きされた古い接続 ID があれば返す。
    async fn register(&self, user_id: UserId, connection_id: ConnectionId) -> Option<ConnectionId>;

    /// 接続 ID から所有ユーザーを逆引きし、対応を削除する
    ///
    /// ユーザーの現在の接続が `connection_id` と一致する場合のみ削除する。
    /// 新しい接続に置き換えられた古い接続の切断（stale disconnect）は無視される。
    /// オフラインになったユーザーを返す。
    async fn unregister(&self, connection_id: &ConnectionId) -> Option<UserId>;

    /// ユーザーがオンラインかどうか
    async fn is_online(&self, user_id: &UserId) -> bool;

    /// ユーザーの現在の接続 ID
    async fn connection_of(&self, user_id: &UserId) -> Option<ConnectionId>;

    /// オンラインのユーザー ID 一覧（ソート済み）
    async fn online_user_ids(&self) -> Vec<UserId>;
}
