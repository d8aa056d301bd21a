//! クライアント側のプレゼンス・入力中・メッセージの状態
//!
//! サーバーからのイベント（`ServerEvent`）を順に適用して画面の状態を保つ。
//! I/O を持たない純粋な状態なので、セッションからもテストからも同じように使える。
//!
//! - オンライン一覧: プレゼンスのスナップショットで丸ごと置き換える
//! - 入力中一覧: 送信者ごと。会話を切り替えるとクリアされる
//! - 未読: 開いていない会話へのメッセージを会話ごとに数える（ダイレクトは送信者ごと）

use std::collections::{BTreeMap, HashSet};

use parley_shared::protocol::{MessagePayload, MessageTargetPayload, ServerEvent};

/// 会話（ダイレクトの相手、またはグループ）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Conversation {
    Direct(String),
    Group(String),
}

impl Conversation {
    /// 自分から見たメッセージの会話
    pub fn of_message(message: &MessagePayload, me: &str) -> Self {
        match &message.target {
            MessageTargetPayload::Direct { recipient_id } => {
                if message.sender_id == me {
                    Self::Direct(recipient_id.clone())
                } else {
                    Self::Direct(message.sender_id.clone())
                }
            }
            MessageTargetPayload::Group { group_id } => Self::Group(group_id.clone()),
        }
    }
}

impl std::fmt::Display for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct(user_id) => write!(f, "@{}", user_id),
            Self::Group(group_id) => write!(f, "#{}", group_id),
        }
    }
}

/// イベント適用の結果（表示の切り替えに使う）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewChange {
    Presence,
    Typing,
    /// 開いている会話に追加された
    MessageShown,
    /// 未読として数えられた
    MessageUnread(Conversation),
    /// 表示も未読も変わらない（別の会話での自分の送信など）
    Unchanged,
}

/// クライアントの表示状態
#[derive(Debug)]
pub struct ChatView {
    me: String,
    online: HashSet<String>,
    typing: HashSet<String>,
    open: Option<Conversation>,
    visible: Vec<MessagePayload>,
    unread: BTreeMap<Conversation, usize>,
}

impl ChatView {
    pub fn new(me: impl Into<String>) -> Self {
        Self {
            me: me.into(),
            online: HashSet::new(),
            typing: HashSet::new(),
            open: None,
            visible: Vec::new(),
            unread: BTreeMap::new(),
        }
    }

    pub fn me(&self) -> &str {
        &self.me
    }

    /// サーバーイベントを適用
    pub fn apply(&mut self, event: ServerEvent) -> ViewChange {
        match event {
            ServerEvent::Presence { online_user_ids } => {
                self.apply_presence(online_user_ids);
                ViewChange::Presence
            }
            ServerEvent::Typing {
                sender_id,
                is_typing,
            } => {
                self.apply_typing(sender_id, is_typing);
                ViewChange::Typing
            }
            ServerEvent::Message { message } => self.apply_message(message),
        }
    }

    /// オンライン一覧をスナップショットで置き換える
    pub fn apply_presence(&mut self, online_user_ids: Vec<String>) {
        self.online = online_user_ids.into_iter().collect();
    }

    pub fn apply_typing(&mut self, sender_id: String, is_typing: bool) {
        if is_typing {
            self.typing.insert(sender_id);
        } else {
            self.typing.remove(&sender_id);
        }
    }

    /// メッセージを開いている会話に追加、または未読として数える
    pub fn apply_message(&mut self, message: MessagePayload) -> ViewChange {
        let conversation = Conversation::of_message(&message, &self.me);
        if self.open.as_ref() == Some(&conversation) {
            self.visible.push(message);
            ViewChange::MessageShown
        } else if message.sender_id == self.me {
            ViewChange::Unchanged
        } else {
            *self.unread.entry(conversation.clone()).or_insert(0) += 1;
            ViewChange::MessageUnread(conversation)
        }
    }

    /// 会話を開き、取得した履歴で表示を置き換える
    pub fn open_conversation(&mut self, conversation: Conversation, history: Vec<MessagePayload>) {
        self.unread.remove(&conversation);
        self.typing.clear();
        self.visible = history;
        self.open = Some(conversation);
    }

    pub fn close_conversation(&mut self) {
        self.open = None;
        self.visible.clear();
        self.typing.clear();
    }

    /// 切断時にライブ状態を捨てる（以降は履歴の取得で補う）
    pub fn reset(&mut self) {
        self.online.clear();
        self.typing.clear();
    }

    pub fn is_online(&self, user_id: &str) -> bool {
        self.online.contains(user_id)
    }

    pub fn is_typing(&self, user_id: &str) -> bool {
        self.typing.contains(user_id)
    }

    pub fn unread_count(&self, conversation: &Conversation) -> usize {
        self.unread.get(conversation).copied().unwrap_or(0)
    }

    /// 未読のある会話の一覧（会話順）
    pub fn unread_summary(&self) -> Vec<(Conversation, usize)> {
        self.unread
            .iter()
            .map(|(conversation, count)| (conversation.clone(), *count))
            .collect()
    }

    /// オンラインのユーザー ID（ソート済み）
    pub fn online_users(&self) -> Vec<String> {
        let mut users: Vec<String> = self.online.iter().cloned().collect();
        users.sort();
        users
    }

    pub fn open(&self) -> Option<&Conversation> {
        self.open.as_ref()
    }

    pub fn visible_messages(&self) -> &[MessagePayload] {
        &self.visible
    }
}
