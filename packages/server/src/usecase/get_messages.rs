//! UseCase: メッセージ履歴の取得
//!
//! リアルタイム配信を受け取れなかったクライアントは、会話を開いたときに
//! この履歴取得でメッセージを補完する。

use std::sync::Arc;

use crate::domain::{GroupId, GroupRepository, Message, MessageRepository, UserId};

use super::error::GetMessagesError;

/// 履歴取得のユースケース
pub struct GetMessagesUseCase {
    messages: Arc<dyn MessageRepository>,
    groups: Arc<dyn GroupRepository>,
}

impl GetMessagesUseCase {
    /// 新しい GetMessagesUseCase を作成
    pub fn new(messages: Arc<dyn MessageRepository>, groups: Arc<dyn GroupRepository>) -> Self {
        Self { messages, groups }
    }

    /// 2 人の間のダイレクトメッセージ履歴（古い順）
    pub async fn direct(&self, me: &UserId, peer: &UserId) -> Result<Vec<Message>, GetMessagesError> {
        Ok(self.messages.direct_history(me, peer).await?)
    }

    /// グループのメッセージ履歴（古い順）。メンバーのみ取得できる
    pub async fn group(
        &self,
        me: &UserId,
        group_id: &GroupId,
    ) -> Result<Vec<Message>, GetMessagesError> {
        let group = self.groups.find(group_id).await?;
        if !group.is_member(me) {
            return Err(GetMessagesError::NotGroupMember(group_id.to_string()));
        }
        Ok(self.messages.group_history(group_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{GroupName, MessageBody, MessageTarget, NewMessage},
        infrastructure::repository::{InMemoryGroupRepository, InMemoryMessageRepository},
    };
    use parley_shared::time::FixedClock;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_group_history_for_member_and_outsider() {
        // テスト項目: メンバーは履歴を取得でき、メンバー以外は拒否される
        // given (前提条件):
        let clock = Arc::new(FixedClock::new(0));
        let messages = Arc::new(InMemoryMessageRepository::new(clock.clone()));
        let groups = Arc::new(InMemoryGroupRepository::new(clock));
        let group = groups
            .create(
                GroupName::new("team".to_string()).unwrap(),
                user("u1"),
                vec![user("u2")],
            )
            .await
            .unwrap();
        messages
            .append(NewMessage {
                sender_id: user("u1"),
                target: MessageTarget::Group {
                    group_id: group.id.clone(),
                },
                body: MessageBody::new(Some("hello team".to_string()), None).unwrap(),
            })
            .await
            .unwrap();
        let usecase = GetMessagesUseCase::new(messages, groups);

        // when (操作):
        let member = usecase.group(&user("u2"), &group.id).await;
        let outsider = usecase.group(&user("u9"), &group.id).await;

        // then (期待する結果):
        assert_eq!(member.unwrap().len(), 1);
        assert_eq!(
            outsider,
            Err(GetMessagesError::NotGroupMember(group.id.to_string()))
        );
    }

    #[tokio::test]
    async fn test_group_history_unknown_group() {
        // テスト項目: 存在しないグループの履歴は GroupNotFound になる
        // given (前提条件):
        let clock = Arc::new(FixedClock::new(0));
        let usecase = GetMessagesUseCase::new(
            Arc::new(InMemoryMessageRepository::new(clock.clone())),
            Arc::new(InMemoryGroupRepository::new(clock)),
        );

        // when (操作):
        let result = usecase
            .group(&user("u1"), &GroupId::new("missing".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(GetMessagesError::GroupNotFound("missing".to_string()))
        );
    }
}
