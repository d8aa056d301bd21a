//! UseCase: メッセージのリアルタイム配信（リレー）
//!
//! 永続化済みのメッセージを、宛先ユーザーのライブ接続に直接送信する。
//!
//! - 宛先がオフラインなら何もしない（次回の履歴取得で受け取れる）
//! - 送信は fire-and-forget。失敗はログに残して握りつぶし、他の宛先には影響させない
//! - グループ宛ては送信者を除く各メンバーに個別に送信する
//!
//! ## テスト実装の作業記録
//!
//! ### どのような状況を想定しているか
//! - 正常系：オンラインの宛先への配信
//! - エッジケース：オフラインの宛先（送信イベント 0 件、エラーなし）
//! - 異常系：一部のメンバーへの送信失敗（他のメンバーには届く）

use std::sync::Arc;

use crate::{
    domain::{ConnectionRegistry, GroupRepository, Message, MessagePusher, MessageTarget, UserId},
    infrastructure::dto::conversion::message_event,
};

/// リレー結果（観測とテストのため）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayOutcome {
    /// 送信できた宛先数
    pub delivered: usize,
    /// オフラインだった宛先数
    pub offline: usize,
    /// 送信に失敗した宛先数
    pub failed: usize,
}

/// メッセージリレーのユースケース
pub struct RelayMessageUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    groups: Arc<dyn GroupRepository>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        groups: Arc<dyn GroupRepository>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            groups,
        }
    }

    /// 永続化済みのメッセージを宛先のライブ接続に送信する
    ///
    /// 失敗しない。失敗はすべてこの中でログに記録される。
    pub async fn relay(&self, message: &Message) -> RelayOutcome {
        let mut outcome = RelayOutcome::default();

        let recipients = self.recipients(message).await;
        if recipients.is_empty() {
            return outcome;
        }

        let json = match message_event(message).to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode message '{}': {}", message.id, e);
                return outcome;
            }
        };

        for recipient in &recipients {
            let Some(connection_id) = self.registry.connection_of(recipient).await else {
                outcome.offline += 1;
                continue;
            };

            match self.message_pusher.push_to(&connection_id, &json).await {
                Ok(()) => outcome.delivered += 1,
                Err(e) => {
                    outcome.failed += 1;
                    tracing::warn!(
                        "Failed to relay message '{}' to '{}': {}",
                        message.id,
                        recipient,
                        e
                    );
                }
            }
        }

        tracing::debug!(
            "Relayed message '{}': delivered={}, offline={}, failed={}",
            message.id,
            outcome.delivered,
            outcome.offline,
            outcome.failed
        );
        outcome
    }

    /// 配信対象のユーザー一覧
    async fn recipients(&self, message: &Message) -> Vec<UserId> {
        match &message.target {
            MessageTarget::Direct { recipient_id } => vec![recipient_id.clone()],
            MessageTarget::Group { group_id } => match self.groups.members(group_id).await {
                Ok(members) => members
                    .into_iter()
                    .filter(|member| member != &message.sender_id)
                    .collect(),
                Err(e) => {
                    tracing::warn!(
                        "Cannot relay message '{}' to group '{}': {}",
                        message.id,
                        group_id,
                        e
                    );
                    Vec::new()
                }
            },
        }
    }
}
