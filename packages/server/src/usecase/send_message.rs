//! UseCase: メッセージ送信処理
//!
//! REST ハンドラから呼ばれる。ストアへの永続化が完了してからリレーする
//! （persist-then-relay）。リレーの結果は送信者へのレスポンスに影響しない。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::send_direct() / send_to_group()
//!
//! ### どのような状況を想定しているか
//! - 正常系：永続化とリレー
//! - 異常系：存在しないグループ、メンバー以外からの送信
//! - エッジケース：宛先がオフラインでも送信は成功する

use std::sync::Arc;

use crate::domain::{
    GroupId, GroupRepository, Message, MessageBody, MessageRepository, MessageTarget, NewMessage,
    UserId,
};

use super::{error::SendMessageError, relay_message::RelayMessageUseCase};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    messages: Arc<dyn MessageRepository>,
    groups: Arc<dyn GroupRepository>,
    relay: Arc<RelayMessageUseCase>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        groups: Arc<dyn GroupRepository>,
        relay: Arc<RelayMessageUseCase>,
    ) -> Self {
        Self {
            messages,
            groups,
            relay,
        }
    }

    /// ユーザー宛てのメッセージを送信
    pub async fn send_direct(
        &self,
        sender_id: UserId,
        recipient_id: UserId,
        body: MessageBody,
    ) -> Result<Message, SendMessageError> {
        self.persist_then_relay(NewMessage {
            sender_id,
            target: MessageTarget::Direct { recipient_id },
            body,
        })
        .await
    }

    /// グループ宛てのメッセージを送信
    ///
    /// 送信者はグループのメンバーである必要がある。
    pub async fn send_to_group(
        &self,
        sender_id: UserId,
        group_id: GroupId,
        body: MessageBody,
    ) -> Result<Message, SendMessageError> {
        let group = self.groups.find(&group_id).await?;
        if !group.is_member(&sender_id) {
            return Err(SendMessageError::NotGroupMember(group_id.into_string()));
        }

        self.persist_then_relay(NewMessage {
            sender_id,
            target: MessageTarget::Group { group_id },
            body,
        })
        .await
    }

    async fn persist_then_relay(&self, message: NewMessage) -> Result<Message, SendMessageError> {
        // 1. ストアに永続化（完了を待つ）
        let stored = self.messages.append(message).await?;

        // 2. ライブ接続にリレー（失敗はリレー内で処理される）
        self.relay.relay(&stored).await;

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, ConnectionRegistry, GroupName, MessagePusher, RepositoryError},
        infrastructure::{
            message_pusher::WebSocketMessagePusher,
            registry::InMemoryConnectionRegistry,
            repository::{InMemoryGroupRepository, InMemoryMessageRepository},
        },
    };
    use async_trait::async_trait;
    use parley_shared::{protocol::ServerEvent, time::FixedClock};
    use tokio::sync::mpsc;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn text(t: &str) -> MessageBody {
        MessageBody::new(Some(t.to_string()), None).unwrap()
    }

    struct Fixture {
        usecase: SendMessageUseCase,
        messages: Arc<InMemoryMessageRepository>,
        groups: Arc<InMemoryGroupRepository>,
        registry: Arc<InMemoryConnectionRegistry>,
        pusher: Arc<WebSocketMessagePusher>,
    }

    fn create_fixture() -> Fixture {
        let clock = Arc::new(FixedClock::new(1000));
        let messages = Arc::new(InMemoryMessageRepository::new(clock.clone()));
        let groups = Arc::new(InMemoryGroupRepository::new(clock));
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let relay = Arc::new(RelayMessageUseCase::new(
            registry.clone(),
            pusher.clone(),
            groups.clone(),
        ));
        Fixture {
            usecase: SendMessageUseCase::new(messages.clone(), groups.clone(), relay),
            messages,
            groups,
            registry,
            pusher,
        }
    }

    #[tokio::test]
    async fn test_send_direct_persists_then_relays() {
        // テスト項目: メッセージが永続化され、オンラインの宛先に同じメッセージが届く
        // given (前提条件):
        let f = create_fixture();
        let (tx, mut rx) = mpsc::unbounded_channel();
        f.pusher.register_connection(conn("c2"), tx).await;
        f.registry.register(user("u2"), conn("c2")).await;

        // when (操作):
        let stored = f
            .usecase
            .send_direct(user("u1"), user("u2"), text("hi"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(f.messages.count().await, 1);
        let event = ServerEvent::from_json(&rx.recv().await.unwrap()).unwrap();
        let ServerEvent::Message { message } = event else {
            panic!("expected message event");
        };
        assert_eq!(message.id, stored.id.as_str());
    }

    #[tokio::test]
    async fn test_send_direct_to_offline_recipient_still_succeeds() {
        // テスト項目: 宛先がオフラインでも送信は成功し、履歴に残る
        // given (前提条件):
        let f = create_fixture();

        // when (操作):
        let result = f
            .usecase
            .send_direct(user("u1"), user("u2"), text("are you there?"))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        let history = f
            .messages
            .direct_history(&user("u2"), &user("u1"))
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_send_to_unknown_group() {
        // テスト項目: 存在しないグループへの送信は GroupNotFound になり、永続化されない
        // given (前提条件):
        let f = create_fixture();

        // when (操作):
        let result = f
            .usecase
            .send_to_group(
                user("u1"),
                GroupId::new("missing".to_string()).unwrap(),
                text("hi"),
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SendMessageError::GroupNotFound("missing".to_string()))
        );
        assert_eq!(f.messages.count().await, 0);
    }

    #[tokio::test]
    async fn test_send_to_group_requires_membership() {
        // テスト項目: メンバー以外からのグループ送信は拒否される
        // given (前提条件):
        let f = create_fixture();
        let group = f
            .groups
            .create(
                GroupName::new("team".to_string()).unwrap(),
                user("u1"),
                vec![user("u2")],
            )
            .await
            .unwrap();

        // when (操作):
        let result = f
            .usecase
            .send_to_group(user("outsider"), group.id.clone(), text("hi"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SendMessageError::NotGroupMember(group.id.into_string()))
        );
        assert_eq!(f.messages.count().await, 0);
    }

    // 永続化に失敗するストア
    struct FailingMessageRepository;

    #[async_trait]
    impl MessageRepository for FailingMessageRepository {
        async fn append(&self, _message: NewMessage) -> Result<Message, RepositoryError> {
            Err(RepositoryError::Unavailable("disk full".to_string()))
        }

        async fn direct_history(
            &self,
            _a: &UserId,
            _b: &UserId,
        ) -> Result<Vec<Message>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn group_history(&self, _group_id: &GroupId) -> Result<Vec<Message>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_persist_failure_never_relays() {
        // テスト項目: 永続化に失敗した場合はリレーされない（persist-then-relay）
        // given (前提条件):
        let f = create_fixture();
        let (tx, mut rx) = mpsc::unbounded_channel();
        f.pusher.register_connection(conn("c2"), tx).await;
        f.registry.register(user("u2"), conn("c2")).await;
        let relay = Arc::new(RelayMessageUseCase::new(
            f.registry.clone(),
            f.pusher.clone(),
            f.groups.clone(),
        ));
        let usecase =
            SendMessageUseCase::new(Arc::new(FailingMessageRepository), f.groups.clone(), relay);

        // when (操作):
        let result = usecase.send_direct(user("u1"), user("u2"), text("hi")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(SendMessageError::Repository(_))));
        assert!(rx.try_recv().is_err());
    }
}
