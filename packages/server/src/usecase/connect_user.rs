//! UseCase: 接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectUserUseCase::execute() メソッド
//! - 接続の登録とレジストリへの登録、プレゼンス通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：認証済みユーザーの接続
//! - 異常系：ユーザー ID がない・不正（"undefined" など）の接続
//! - エッジケース：同一ユーザーの再接続（last-connected-wins）

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, MessagePusher, PusherChannel, UserId};

use super::announce_presence::PresenceBroadcaster;

/// 接続のユースケース
pub struct ConnectUserUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    presence: Arc<PresenceBroadcaster>,
}

impl ConnectUserUseCase {
    /// 新しい ConnectUserUseCase を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        presence: Arc<PresenceBroadcaster>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            presence,
        }
    }

    /// 接続を実行
    ///
    /// 送信チャンネルは常に登録される（プレゼンスのスナップショットは全接続に届く）。
    /// ユーザー ID が不正な場合はレジストリに登録しないだけで、エラーにはしない。
    /// その場合オンライン一覧は変わらないため、全体通知は行わず
    /// この接続にだけ現在のスナップショットを送る。
    ///
    /// # Arguments
    ///
    /// * `raw_user_id` - 認証層から渡されたユーザー ID（未検証の文字列）
    /// * `connection_id` - トランスポートが採番した接続 ID
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// オンラインとして登録されたユーザー ID（登録されなかった場合は `None`）
    pub async fn execute(
        &self,
        raw_user_id: Option<String>,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Option<UserId> {
        // 1. 送信チャンネルを登録
        self.message_pusher
            .register_connection(connection_id.clone(), sender)
            .await;

        // 2. ユーザー ID を検証し、レジストリに登録
        let user_id = match raw_user_id.map(UserId::try_from) {
            Some(Ok(user_id)) => Some(user_id),
            Some(Err(e)) => {
                tracing::debug!(
                    "Connection '{}' is not registered for presence: {}",
                    connection_id,
                    e
                );
                None
            }
            None => {
                tracing::debug!(
                    "Connection '{}' has no user id, not registered for presence",
                    connection_id
                );
                None
            }
        };

        if let Some(user_id) = &user_id {
            if let Some(old) = self
                .registry
                .register(user_id.clone(), connection_id.clone())
                .await
            {
                tracing::info!(
                    "User '{}' now receives pushes on '{}' instead of '{}'",
                    user_id,
                    connection_id,
                    old
                );
            }
        }

        // 3. プレゼンスを通知（オンライン一覧が変わったときだけ全接続へ）
        if user_id.is_some() {
            self.presence.announce().await;
        } else {
            self.presence.send_snapshot_to(&connection_id).await;
        }

        user_id
    }
}
