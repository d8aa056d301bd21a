//! 入力行の処理
//!
//! 接続中でも切断中でも同じ `CommandHandler` が入力を処理する。
//! 履歴・送信・オンライン一覧は REST で行うため、WebSocket が使えない間も動く。
//! 入力中シグナルだけは WebSocket でしか送れないので、送信待ちのキューに積み、
//! セッション側がフレームとして書き出す。

use std::sync::Arc;

use parley_shared::protocol::{ClientEvent, MessagePayload};
use tokio::{sync::Mutex, time::Instant};

use crate::{
    api::ApiClient,
    command::Command,
    consumer::{ChatView, Conversation},
    error::ClientError,
    formatter::MessageFormatter,
    typing::TypingTracker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct CommandHandler {
    api: ApiClient,
    view: Arc<Mutex<ChatView>>,
    typing: TypingTracker,
    outgoing: Vec<ClientEvent>,
    connected: bool,
}

impl CommandHandler {
    pub fn new(api: ApiClient, view: Arc<Mutex<ChatView>>) -> Self {
        Self {
            api,
            view,
            typing: TypingTracker::new(),
            outgoing: Vec::new(),
            connected: false,
        }
    }

    /// WebSocket の接続状態を切り替える
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// WebSocket で送るべきイベントを取り出す
    pub fn take_outgoing(&mut self) -> Vec<ClientEvent> {
        std::mem::take(&mut self.outgoing)
    }

    /// 入力中の自動停止の期限
    pub fn typing_deadline(&self) -> Option<Instant> {
        self.typing.deadline()
    }

    pub fn expire_typing(&mut self, now: Instant) {
        if let Some(event) = self.typing.expire(now) {
            self.outgoing.push(event);
        }
    }

    pub fn stop_typing(&mut self) {
        if let Some(event) = self.typing.stop() {
            self.outgoing.push(event);
        }
    }

    /// 1 行を処理する
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow, ClientError> {
        match Command::parse(line)? {
            Command::Quit => {
                self.stop_typing();
                return Ok(Flow::Quit);
            }
            Command::OpenDirect(user_id) => {
                self.stop_typing();
                let history = self.api.direct_history(&user_id).await?;
                self.open_conversation(Conversation::Direct(user_id), history)
                    .await;
            }
            Command::OpenGroup(group_id) => {
                self.stop_typing();
                let history = self.api.group_history(&group_id).await?;
                self.open_conversation(Conversation::Group(group_id), history)
                    .await;
            }
            Command::Close => {
                self.stop_typing();
                self.view.lock().await.close_conversation();
            }
            Command::Online => {
                let (online, me) = if self.connected {
                    let view = self.view.lock().await;
                    (view.online_users(), view.me().to_string())
                } else {
                    // プッシュが届かない間はその場で問い合わせる
                    let online = self.api.online_users().await?;
                    (online, self.view.lock().await.me().to_string())
                };
                print!("{}", MessageFormatter::format_presence(&online, &me));
            }
            Command::Unread => {
                let summary = self.view.lock().await.unread_summary();
                print!("{}", MessageFormatter::format_unread(&summary));
            }
            Command::Typing(is_typing) => {
                let open = self.view.lock().await.open().cloned();
                let Some(Conversation::Direct(recipient_id)) = open else {
                    return Err(ClientError::InvalidCommand(
                        "typing requires an open direct conversation".to_string(),
                    ));
                };
                if is_typing {
                    if !self.connected {
                        tracing::debug!("Not connected, typing signal for '{}' dropped", recipient_id);
                        return Ok(Flow::Continue);
                    }
                    let events = self.typing.start(&recipient_id, Instant::now());
                    self.outgoing.extend(events);
                } else {
                    self.stop_typing();
                }
            }
            Command::Send(text) => {
                let open = self.view.lock().await.open().cloned();
                let message = match open {
                    Some(Conversation::Direct(recipient_id)) => {
                        self.stop_typing();
                        self.api.send_direct(&recipient_id, &text).await?
                    }
                    Some(Conversation::Group(group_id)) => {
                        self.api.send_group(&group_id, &text).await?
                    }
                    None => {
                        return Err(ClientError::InvalidCommand(
                            "open a conversation first".to_string(),
                        ));
                    }
                };
                print!(
                    "{}",
                    MessageFormatter::format_sent_confirmation(message.created_at)
                );
                // 自分の送信はリレーされないので、ここで表示に追加する
                self.view.lock().await.apply_message(message);
            }
        }
        Ok(Flow::Continue)
    }

    async fn open_conversation(&self, conversation: Conversation, history: Vec<MessagePayload>) {
        print!(
            "{}",
            MessageFormatter::format_history(&conversation, &history)
        );
        self.view
            .lock()
            .await
            .open_conversation(conversation, history);
    }
}
