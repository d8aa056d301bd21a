//! UseCase: プレゼンスの通知
//!
//! レジストリが変化するたびに、現在のオンラインユーザー一覧の全量スナップショットを
//! 全ての接続に送信する（差分ではない）。
//!
//! スナップショットの取得と送信はゲート（Mutex）の内側で行う。
//! これにより、接続・切断が並行しても最後に届くスナップショットは
//! 最後の変更後のレジストリと一致する。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, ConnectionRegistry, MessagePusher, UserId},
    infrastructure::dto::conversion::presence_event,
};

/// プレゼンス通知
pub struct PresenceBroadcaster {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    gate: Mutex<()>,
}

impl PresenceBroadcaster {
    /// 新しい PresenceBroadcaster を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            gate: Mutex::new(()),
        }
    }

    /// 現在のオンライン一覧を全ての接続に通知し、送信できた接続数を返す
    pub async fn announce(&self) -> usize {
        let _gate = self.gate.lock().await;
        let online = self.registry.online_user_ids().await;
        self.push_snapshot(&online).await
    }

    /// 現在のオンライン一覧を指定した接続にだけ送信する
    ///
    /// レジストリに変化がない接続（ユーザー ID を持たない接続など）の初回表示用。
    /// 他の接続にはスナップショットを送らない。
    pub async fn send_snapshot_to(&self, connection_id: &ConnectionId) -> bool {
        let _gate = self.gate.lock().await;
        let online = self.registry.online_user_ids().await;
        let json = match presence_event(&online).to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode presence snapshot: {}", e);
                return false;
            }
        };

        match self.message_pusher.push_to(connection_id, &json).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to send presence snapshot to '{}': {}", connection_id, e);
                false
            }
        }
    }

    async fn push_snapshot(&self, online: &[UserId]) -> usize {
        let json = match presence_event(online).to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode presence snapshot: {}", e);
                return 0;
            }
        };

        let reached = self.message_pusher.broadcast_all(&json).await;
        tracing::info!(
            "Announced presence ({} online) to {} connections",
            online.len(),
            reached
        );
        reached
    }
}
