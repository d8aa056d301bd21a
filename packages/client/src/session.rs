//! WebSocket client session management.

use std::{fmt::Display, sync::Arc};

use futures_util::{Sink, SinkExt, StreamExt};
use parley_shared::protocol::ServerEvent;
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
    time::Instant,
};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    command::USAGE,
    consumer::{ChatView, ViewChange},
    endpoint::websocket_url,
    error::ClientError,
    handler::{CommandHandler, Flow},
    runner::ClientConfig,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Run one WebSocket client session.
///
/// `Ok(())` はユーザーの終了操作、`Err` は接続の失敗または切断。
pub async fn run_client_session(
    config: &ClientConfig,
    handler: &mut CommandHandler,
    view: Arc<Mutex<ChatView>>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let url = websocket_url(&config.ws_url, &config.user_id)?;

    let (ws_stream, _response) = connect_async(url.as_str())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!("\nYou are '{}'.\n{}\n", config.user_id, USAGE);

    let (mut write, mut read) = ws_stream.split();

    let read_view = view.clone();
    let me = config.user_id.clone();

    // サーバーからのイベントを ChatView に適用して表示
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let output = match ServerEvent::from_json(text.as_str()) {
                        Ok(event) => {
                            let mut view = read_view.lock().await;
                            render_event(&mut view, event)
                        }
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", output);
                    redisplay_prompt(&me);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return "closed by server".to_string();
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return e.to_string();
                }
                _ => {}
            }
        }
        "stream ended".to_string()
    });

    handler.set_connected(true);
    let result = session_loop(handler, &mut read_task, &mut write, input_rx, &config.user_id).await;
    handler.set_connected(false);

    read_task.abort();
    if result.is_ok() {
        flush_outgoing(handler, &mut write).await.ok();
        write.close().await.ok();
    }
    result
}

async fn session_loop<S>(
    handler: &mut CommandHandler,
    read_task: &mut JoinHandle<String>,
    write: &mut S,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    user_id: &str,
) -> Result<(), ClientError>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    // 切断中に止めた入力中シグナルを先に届ける
    flush_outgoing(handler, write).await?;

    loop {
        let typing_deadline = handler.typing_deadline();
        tokio::select! {
            reason = &mut *read_task => {
                let reason = reason.unwrap_or_else(|e| e.to_string());
                return Err(ClientError::ConnectionLost(reason));
            }
            line = input_rx.recv() => {
                // 入力スレッドの終了（Ctrl+C / Ctrl+D）は終了操作として扱う
                let Some(line) = line else {
                    handler.stop_typing();
                    return Ok(());
                };
                if dispatch_line(handler, &line).await == Flow::Quit {
                    return Ok(());
                }
                flush_outgoing(handler, write).await?;
                redisplay_prompt(user_id);
            }
            _ = wait_until(typing_deadline) => {
                handler.expire_typing(Instant::now());
                flush_outgoing(handler, write).await?;
            }
        }
    }
}

/// WebSocket がない間の入力処理
///
/// REST で賄えるコマンドはそのまま処理する。`retry_at` を過ぎたら
/// `Flow::Continue` を返して再接続に戻り、`None` なら終了操作まで処理し続ける。
pub async fn serve_offline(
    handler: &mut CommandHandler,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    retry_at: Option<Instant>,
    user_id: &str,
) -> Flow {
    loop {
        let typing_deadline = handler.typing_deadline();
        tokio::select! {
            _ = wait_until(retry_at) => return Flow::Continue,
            _ = wait_until(typing_deadline) => handler.expire_typing(Instant::now()),
            line = input_rx.recv() => {
                let Some(line) = line else {
                    handler.stop_typing();
                    return Flow::Quit;
                };
                if dispatch_line(handler, &line).await == Flow::Quit {
                    return Flow::Quit;
                }
                redisplay_prompt(user_id);
            }
        }
    }
}

/// 1 行を処理し、エラーは表示だけして続行する
async fn dispatch_line(handler: &mut CommandHandler, line: &str) -> Flow {
    match handler.handle_line(line).await {
        Ok(flow) => flow,
        Err(e @ ClientError::InvalidCommand(_)) => {
            println!("{}\n{}", e, USAGE);
            Flow::Continue
        }
        Err(e) => {
            println!("{}", e);
            Flow::Continue
        }
    }
}

/// 送信待ちのイベントを WebSocket に書き出す
async fn flush_outgoing<S>(handler: &mut CommandHandler, write: &mut S) -> Result<(), ClientError>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    for event in handler.take_outgoing() {
        let json = event.to_json()?;
        write
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| ClientError::ConnectionLost(e.to_string()))?;
    }
    Ok(())
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// イベントを適用し、表示する文字列を返す
fn render_event(view: &mut ChatView, event: ServerEvent) -> String {
    let change = view.apply(event.clone());
    match (change, event) {
        (ViewChange::Presence, _) => {
            MessageFormatter::format_presence(&view.online_users(), view.me())
        }
        (
            ViewChange::Typing,
            ServerEvent::Typing {
                sender_id,
                is_typing,
            },
        ) => MessageFormatter::format_typing(&sender_id, is_typing),
        (ViewChange::MessageShown, ServerEvent::Message { message }) => {
            format!("\n{}\n", MessageFormatter::format_message(&message))
        }
        (ViewChange::MessageUnread(conversation), _) => {
            let count = view.unread_count(&conversation);
            MessageFormatter::format_unread_notice(&conversation, count)
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::ApiClient, consumer::Conversation};
    use parley_shared::protocol::ClientEvent;

    async fn typing_handler() -> (CommandHandler, Arc<Mutex<ChatView>>) {
        let view = Arc::new(Mutex::new(ChatView::new("u1")));
        view.lock()
            .await
            .open_conversation(Conversation::Direct("u2".to_string()), vec![]);
        let api = ApiClient::new("http://127.0.0.1:1/api", "u1").unwrap();
        let mut handler = CommandHandler::new(api, view.clone());
        handler.set_connected(true);
        (handler, view)
    }

    fn typing_frame(is_typing: bool) -> Message {
        let json = ClientEvent::Typing {
            recipient_id: "u2".to_string(),
            is_typing,
        }
        .to_json()
        .unwrap();
        Message::Text(json.into())
    }

    #[tokio::test]
    async fn test_typing_on_then_close_writes_true_then_false() {
        // テスト項目: /typing on と /close で true と false のフレームが順に書き出される
        // given (前提条件):
        let (mut handler, _view) = typing_handler().await;
        let mut sink: Vec<Message> = Vec::new();

        // when (操作):
        handler.handle_line("/typing on").await.unwrap();
        flush_outgoing(&mut handler, &mut sink).await.unwrap();
        handler.handle_line("/close").await.unwrap();
        flush_outgoing(&mut handler, &mut sink).await.unwrap();

        // then (期待する結果):
        assert_eq!(sink, vec![typing_frame(true), typing_frame(false)]);
    }

    #[tokio::test]
    async fn test_flush_after_idle_timeout_writes_false() {
        // テスト項目: 期限切れで自動停止した入力中シグナルが false として書き出される
        // given (前提条件):
        let (mut handler, _view) = typing_handler().await;
        let mut sink: Vec<Message> = Vec::new();
        handler.handle_line("/typing on").await.unwrap();
        flush_outgoing(&mut handler, &mut sink).await.unwrap();

        // when (操作):
        let deadline = handler.typing_deadline().unwrap();
        handler.expire_typing(deadline);
        flush_outgoing(&mut handler, &mut sink).await.unwrap();

        // then (期待する結果):
        assert_eq!(sink, vec![typing_frame(true), typing_frame(false)]);
        assert_eq!(handler.typing_deadline(), None);
    }

    #[tokio::test]
    async fn test_flush_with_nothing_queued_writes_nothing() {
        // テスト項目: 送信待ちがなければ何も書き出さない
        // given (前提条件):
        let (mut handler, _view) = typing_handler().await;
        let mut sink: Vec<Message> = Vec::new();

        // when (操作):
        flush_outgoing(&mut handler, &mut sink).await.unwrap();

        // then (期待する結果):
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_serve_offline_returns_to_reconnect_at_retry_time() {
        // テスト項目: 切断中の入力処理は再接続の時刻になると Continue を返す
        // given (前提条件):
        let (mut handler, _view) = typing_handler().await;
        let (_input_tx, mut input_rx) = mpsc::unbounded_channel();

        // when (操作):
        let flow = serve_offline(&mut handler, &mut input_rx, Some(Instant::now()), "u1").await;

        // then (期待する結果):
        assert_eq!(flow, Flow::Continue);
    }

    #[tokio::test]
    async fn test_serve_offline_handles_commands_until_quit() {
        // テスト項目: 再接続を諦めた後も終了操作まで入力を処理し続ける
        // given (前提条件):
        let (mut handler, view) = typing_handler().await;
        handler.set_connected(false);
        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        input_tx.send("/close".to_string()).unwrap();
        input_tx.send("/quit".to_string()).unwrap();

        // when (操作):
        let flow = serve_offline(&mut handler, &mut input_rx, None, "u1").await;

        // then (期待する結果):
        assert_eq!(flow, Flow::Quit);
        assert!(view.lock().await.open().is_none());
    }
}
