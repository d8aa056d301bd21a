//! Client execution logic with reconnection support.

use std::sync::Arc;

use tokio::{sync::Mutex, time::Instant};

use crate::{api::ApiClient, consumer::ChatView, error::ClientError};

use super::{
    domain::{reconnect_delay, should_attempt_reconnect},
    handler::{CommandHandler, Flow},
    session::{run_client_session, serve_offline},
    ui::spawn_readline,
};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// 認証済みユーザー ID
    pub user_id: String,
    /// WebSocket URL (e.g. `ws://127.0.0.1:8080/ws`)
    pub ws_url: String,
    /// REST API base URL (e.g. `http://127.0.0.1:8080/api`)
    pub api_url: String,
    /// ライブ接続の連続失敗の上限（超えたら REST のみで動く）
    pub max_reconnect_attempts: u32,
}

/// Run the chat client with reconnection logic
///
/// 接続に成功したセッションが切れた場合は失敗回数をリセットする。
/// 切断中も REST で賄えるコマンドは処理し続ける。
/// 上限回数まで連続で失敗したら再接続をやめ、以降は終了操作まで
/// REST だけで動く（プッシュの代わりに都度問い合わせる）。
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let api = ApiClient::new(&config.api_url, &config.user_id)?;
    let view = Arc::new(Mutex::new(ChatView::new(config.user_id.clone())));
    let mut handler = CommandHandler::new(api, view.clone());
    let mut input_rx = spawn_readline(config.user_id.clone());
    let mut consecutive_failures = 0;

    loop {
        tracing::info!(
            "Connecting to {} as '{}' (attempt {}/{})",
            config.ws_url,
            config.user_id,
            consecutive_failures + 1,
            config.max_reconnect_attempts
        );

        let error =
            match run_client_session(&config, &mut handler, view.clone(), &mut input_rx).await {
                Ok(()) => {
                    tracing::info!("Client session ended normally");
                    return Ok(());
                }
                Err(e) => e,
            };

        // ライブ状態は信用できないので捨てる
        view.lock().await.reset();

        if matches!(error, ClientError::ConnectionLost(_)) {
            consecutive_failures = 0;
        }
        consecutive_failures += 1;
        tracing::warn!("{}", error);

        let retry_at = if should_attempt_reconnect(
            &error,
            consecutive_failures,
            config.max_reconnect_attempts,
        ) {
            let delay = reconnect_delay(consecutive_failures - 1);
            tracing::info!(
                "Reconnecting in {:?}... (attempt {}/{})",
                delay,
                consecutive_failures + 1,
                config.max_reconnect_attempts
            );
            Some(Instant::now() + delay)
        } else {
            tracing::info!(
                "Live updates unavailable after {} attempts, continuing over REST only",
                consecutive_failures
            );
            None
        };

        if serve_offline(&mut handler, &mut input_rx, retry_at, &config.user_id).await
            == Flow::Quit
        {
            tracing::info!("Client ended while disconnected");
            return Ok(());
        }
    }
}
