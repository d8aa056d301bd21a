//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use parley_shared::protocol::ClientEvent;
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, UserId},
    ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// 認証済みユーザー ID。なし・不正でも接続は受け付ける（オンラインにはならない）
    pub user_id: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    let connection_id = ConnectionIdFactory::generate();
    tracing::info!(
        "Upgrading connection '{}' (user_id: {:?})",
        connection_id,
        query.user_id
    );
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id, query.user_id))
}

/// Spawns a task that drains the connection's channel into the WebSocket sink.
///
/// 1 接続につき 1 タスクなので、この接続へのイベントは送信順に届く。
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    raw_user_id: Option<String>,
) {
    let (sender, mut receiver) = socket.split();

    // 送信タスクを先に起動し、接続時のスナップショットを取りこぼさないようにする
    let (tx, rx) = mpsc::unbounded_channel();
    let mut send_task = pusher_loop(rx, sender);

    // レジストリ登録とプレゼンス通知
    let user_id = state
        .connect_user_usecase
        .execute(raw_user_id, connection_id.clone(), tx)
        .await;

    let state_clone = state.clone();
    let user_id_clone = user_id.clone();
    let connection_id_clone = connection_id.clone();

    // クライアントからのイベントを受信
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_event(&state_clone, user_id_clone.as_ref(), &text).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // どちらかのタスクが終了したら、もう一方を中断
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // 登録解除とプレゼンス通知（stale disconnect は無視される）
    state
        .disconnect_user_usecase
        .execute(&connection_id)
        .await;
    tracing::info!("Connection '{}' closed", connection_id);
}

async fn handle_client_event(state: &AppState, sender_id: Option<&UserId>, text: &str) {
    let event = match ClientEvent::from_json(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring malformed client event: {}", e);
            return;
        }
    };

    match event {
        ClientEvent::Typing {
            recipient_id,
            is_typing,
        } => {
            let Some(sender_id) = sender_id else {
                tracing::debug!("Ignoring typing event from unregistered connection");
                return;
            };
            let recipient_id = match UserId::try_from(recipient_id) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Ignoring typing event: {}", e);
                    return;
                }
            };
            state
                .relay_typing_usecase
                .relay(sender_id, &recipient_id, is_typing)
                .await;
        }
    }
}
