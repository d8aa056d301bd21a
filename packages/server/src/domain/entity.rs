//! Entity 定義

use serde::{Deserialize, Serialize};

use super::value_object::{GroupId, GroupName, MessageBody, MessageId, Timestamp, UserId};

/// メッセージの宛先
///
/// ユーザー宛てかグループ宛てのどちらか一方のみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageTarget {
    Direct { recipient_id: UserId },
    Group { group_id: GroupId },
}

/// 永続化済みのメッセージ
///
/// ストアが所有するエンティティ。リレーはこれを読むだけで変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub target: MessageTarget,
    pub body: MessageBody,
    pub created_at: Timestamp,
}

impl Message {
    /// 2 人のユーザー間のダイレクトメッセージかどうか（向きは問わない）
    pub fn is_between(&self, a: &UserId, b: &UserId) -> bool {
        match &self.target {
            MessageTarget::Direct { recipient_id } => {
                (&self.sender_id == a && recipient_id == b)
                    || (&self.sender_id == b && recipient_id == a)
            }
            MessageTarget::Group { .. } => false,
        }
    }

    /// 指定グループ宛てのメッセージかどうか
    pub fn is_in_group(&self, group: &GroupId) -> bool {
        matches!(&self.target, MessageTarget::Group { group_id } if group_id == group)
    }
}

/// 永続化前のメッセージ（ID と作成時刻はストアが付与する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender_id: UserId,
    pub target: MessageTarget,
    pub body: MessageBody,
}

/// チャットグループ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: GroupName,
    pub creator: UserId,
    pub members: Vec<UserId>,
    pub created_at: Timestamp,
}

impl Group {
    /// 新しいグループを作成
    ///
    /// 作成者は常にメンバーの先頭に含まれ、重複したメンバーは取り除かれる。
    pub fn new(
        id: GroupId,
        name: GroupName,
        creator: UserId,
        member_ids: Vec<UserId>,
        created_at: Timestamp,
    ) -> Self {
        let mut members = vec![creator.clone()];
        for member in member_ids {
            if !members.contains(&member) {
                members.push(member);
            }
        }
        Self {
            id,
            name,
            creator,
            members,
            created_at,
        }
    }

    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.contains(user_id)
    }
}
