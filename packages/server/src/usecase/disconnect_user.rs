//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUserUseCase::execute() メソッド
//! - 接続の登録解除、レジストリからの削除、プレゼンス通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：オンラインユーザーの切断
//! - エッジケース：再接続後に古い接続の切断が届く（stale disconnect）
//! - エッジケース：同じ接続の二重切断（冪等性）

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, MessagePusher, UserId};

use super::announce_presence::PresenceBroadcaster;

/// 切断のユースケース
pub struct DisconnectUserUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    presence: Arc<PresenceBroadcaster>,
}

impl DisconnectUserUseCase {
    /// 新しい DisconnectUserUseCase を作成
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

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// オフラインになったユーザー ID。stale disconnect や未登録の接続では `None`。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<UserId> {
        // 1. 送信チャンネルを登録解除
        self.message_pusher
            .unregister_connection(connection_id)
            .await;

        // 2. レジストリから削除（接続 ID が一致する場合のみ）
        let user_id = self.registry.unregister(connection_id).await?;
        tracing::info!("User '{}' went offline", user_id);

        // 3. プレゼンスを通知
        self.presence.announce().await;

        Some(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::MockConnectionRegistry,
        infrastructure::{
            message_pusher::WebSocketMessagePusher, registry::InMemoryConnectionRegistry,
        },
    };
    use parley_shared::protocol::ServerEvent;
    use tokio::sync::mpsc;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    struct Fixture {
        usecase: DisconnectUserUseCase,
        registry: Arc<InMemoryConnectionRegistry>,
        pusher: Arc<WebSocketMessagePusher>,
    }

    fn create_fixture() -> Fixture {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let presence = Arc::new(PresenceBroadcaster::new(registry.clone(), pusher.clone()));
        Fixture {
            usecase: DisconnectUserUseCase::new(registry.clone(), pusher.clone(), presence),
            registry,
            pusher,
        }
    }

    #[tokio::test]
    async fn test_disconnect_announces_remaining_users() {
        // テスト項目: 切断後、残りの接続に最新のスナップショットが届く
        // given (前提条件):
        let f = create_fixture();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        f.pusher.register_connection(conn("c1"), tx1).await;
        f.pusher.register_connection(conn("c2"), tx2).await;
        f.registry.register(user("u1"), conn("c1")).await;
        f.registry.register(user("u2"), conn("c2")).await;

        // when (操作):
        let result = f.usecase.execute(&conn("c1")).await;

        // then (期待する結果):
        assert_eq!(result, Some(user("u1")));
        assert_eq!(f.pusher.connection_count().await, 1);
        let json = rx2.recv().await.unwrap();
        assert_eq!(
            ServerEvent::from_json(&json).unwrap(),
            ServerEvent::Presence {
                online_user_ids: vec!["u2".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_stale_disconnect_keeps_user_online_and_is_silent() {
        // テスト項目: 古い接続の切断では新しい接続が維持され、通知も行われない
        // given (前提条件):
        let f = create_fixture();
        let (tx_new, mut rx_new) = mpsc::unbounded_channel();
        f.pusher.register_connection(conn("c2"), tx_new).await;
        f.registry.register(user("u1"), conn("c1")).await;
        f.registry.register(user("u1"), conn("c2")).await;

        // when (操作):
        let result = f.usecase.execute(&conn("c1")).await;

        // then (期待する結果):
        assert_eq!(result, None);
        assert_eq!(f.registry.connection_of(&user("u1")).await, Some(conn("c2")));
        assert!(rx_new.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        // テスト項目: 同じ接続の二重切断は 2 回目が何もしない
        // given (前提条件):
        let f = create_fixture();
        f.registry.register(user("u1"), conn("c1")).await;
        f.usecase.execute(&conn("c1")).await;

        // when (操作):
        let result = f.usecase.execute(&conn("c1")).await;

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_unregistered_connection_does_not_touch_presence() {
        // テスト項目: レジストリが変化しない切断ではプレゼンス通知を行わない
        // given (前提条件):
        let mut registry = MockConnectionRegistry::new();
        registry.expect_unregister().times(1).returning(|_| None);
        registry.expect_online_user_ids().never();
        let registry: Arc<dyn ConnectionRegistry> = Arc::new(registry);
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let presence = Arc::new(PresenceBroadcaster::new(registry.clone(), pusher.clone()));
        let usecase = DisconnectUserUseCase::new(registry, pusher, presence);

        // when (操作):
        let result = usecase.execute(&conn("anon")).await;

        // then (期待する結果):
        assert_eq!(result, None);
    }
}
