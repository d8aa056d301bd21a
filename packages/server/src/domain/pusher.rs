//! MessagePusher trait 定義
//!
//! ライブ接続へのメッセージ送信の抽象化。
//! 接続ごとの送信チャンネルは `ConnectionId` をキーに管理されます。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::ConnectionId};

/// 1 接続分の送信チャンネル（JSON テキストフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除（存在しなければ何もしない）
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 特定の接続にメッセージを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 全ての接続にメッセージを送信し、送信できた接続数を返す
    ///
    /// 一部の接続への送信失敗は許容される。
    async fn broadcast_all(&self, content: &str) -> usize;
}
