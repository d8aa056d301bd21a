//! UseCase: 入力中シグナルのリレー
//!
//! 永続化しない一時的なイベントを、宛先のライブ接続にそのまま転送する。
//! デバウンスやタイムアウトは持たない（送信側クライアントが停止シグナルを送る）。

use std::sync::Arc;

use crate::{
    domain::{ConnectionRegistry, MessagePusher, UserId},
    infrastructure::dto::conversion::typing_event,
};

/// 入力中シグナルのリレー
pub struct RelayTypingUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayTypingUseCase {
    /// 新しい RelayTypingUseCase を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 入力中シグナルを転送し、送信したかどうかを返す
    ///
    /// 宛先が送信者自身、またはオフラインの場合は何もしない。
    pub async fn relay(&self, sender_id: &UserId, recipient_id: &UserId, is_typing: bool) -> bool {
        if sender_id == recipient_id {
            return false;
        }

        let Some(connection_id) = self.registry.connection_of(recipient_id).await else {
            return false;
        };

        let json = match typing_event(sender_id, is_typing).to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode typing signal: {}", e);
                return false;
            }
        };

        match self.message_pusher.push_to(&connection_id, &json).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Failed to relay typing signal from '{}' to '{}': {}",
                    sender_id,
                    recipient_id,
                    e
                );
                false
            }
        }
    }
}
