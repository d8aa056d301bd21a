//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を `ConnectionId` をキーに管理
//! - クライアントへのメッセージ送信（push_to, broadcast_all）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信側のチャンネルは接続ごとに 1 本なので、1 接続内のイベント順序は送信順と一致します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_connection(connection_id.clone(), tx).await;
/// pusher.push_to(&connection_id, "{\"type\":\"presence\",\"online_user_ids\":[]}").await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// Key: ConnectionId, Value: PusherChannel
    channels: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録済みの接続数
    pub async fn connection_count(&self) -> usize {
        self.channels.lock().await.len()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut channels = self.channels.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        channels.insert(connection_id, sender);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut channels = self.channels.lock().await;
        if channels.remove(connection_id).is_some() {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let channels = self.channels.lock().await;

        let sender = channels
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ConnectionNotFound(connection_id.to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast_all(&self, content: &str) -> usize {
        let channels = self.channels.lock().await;

        let mut delivered = 0;
        for (connection_id, sender) in channels.iter() {
            // ブロードキャストでは一部の送信失敗を許容
            match sender.send(content.to_string()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    "Failed to push message to connection '{}': {}",
                    connection_id,
                    e
                ),
            }
        }
        tracing::debug!(
            "Broadcasted message to {}/{} connections",
            delivered,
            channels.len()
        );
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定の接続への送信
    // - broadcast_all: 全接続への送信
    // - エラーハンドリング（存在しない接続、閉じたチャンネル）
    // ========================================

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続にメッセージを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx).await;

        // when (操作):
        let result = pusher.push_to(&conn("c1"), "Hello").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_connection_not_found() {
        // テスト項目: 存在しない接続への送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.push_to(&conn("nonexistent"), "Hello").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessagePushError::ConnectionNotFound("nonexistent".to_string()))
        );
    }

    #[tokio::test]
    async fn test_push_to_closed_channel_fails() {
        // テスト項目: 受信側が閉じた接続への送信は PushFailed になる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, rx) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx).await;
        drop(rx);

        // when (操作):
        let result = pusher.push_to(&conn("c1"), "Hello").await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::PushFailed(_))));
    }

    #[tokio::test]
    async fn test_broadcast_all_skips_failed_connections() {
        // テスト項目: 全接続へのブロードキャストは一部の失敗を許容する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx1).await;
        pusher.register_connection(conn("c2"), tx2).await;
        pusher.register_connection(conn("c3"), tx3).await;
        drop(rx2);

        // when (操作):
        let delivered = pusher.broadcast_all("snapshot").await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(rx1.recv().await, Some("snapshot".to_string()));
        assert_eq!(rx3.recv().await, Some("snapshot".to_string()));
    }

    #[tokio::test]
    async fn test_unregister_connection() {
        // テスト項目: 登録解除した接続には送信されない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx).await;

        // when (操作):
        pusher.unregister_connection(&conn("c1")).await;
        pusher.unregister_connection(&conn("c1")).await;

        // then (期待する結果):
        assert_eq!(pusher.connection_count().await, 0);
        assert_eq!(pusher.broadcast_all("snapshot").await, 0);
    }
}
