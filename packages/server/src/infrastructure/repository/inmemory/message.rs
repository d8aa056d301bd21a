//! InMemory Message Repository 実装
//!
//! ドメイン層が定義する MessageRepository trait の具体的な実装。
//! Vec を追記専用のインメモリ DB として使用します。

use std::sync::Arc;

use async_trait::async_trait;
use parley_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    GroupId, Message, MessageIdFactory, MessageRepository, NewMessage, RepositoryError, Timestamp,
    UserId,
};

/// インメモリ Message Repository 実装
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<Message>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// 保存済みメッセージ数
    pub async fn count(&self) -> usize {
        self.messages.lock().await.len()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: NewMessage) -> Result<Message, RepositoryError> {
        let stored = Message {
            id: MessageIdFactory::generate(),
            sender_id: message.sender_id,
            target: message.target,
            body: message.body,
            created_at: Timestamp::new(self.clock.now_millis()),
        };

        let mut messages = self.messages.lock().await;
        messages.push(stored.clone());
        Ok(stored)
    }

    async fn direct_history(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| m.is_between(a, b))
            .cloned()
            .collect())
    }

    async fn group_history(&self, group_id: &GroupId) -> Result<Vec<Message>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| m.is_in_group(group_id))
            .cloned()
            .collect())
    }
}
