//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        create_group, get_direct_messages, get_group_messages, get_online_users, health_check,
        send_direct_message, send_group_message, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// ルーティングを組み立てる
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/users/online", get(get_online_users))
        .route(
            "/api/messages/{user_id}",
            get(get_direct_messages).post(send_direct_message),
        )
        .route("/api/groups", post(create_group))
        .route(
            "/api/groups/{group_id}/messages",
            get(get_group_messages).post(send_group_message),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Chat server (REST + WebSocket)
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(AppState::in_memory(Arc::new(SystemClock)));
/// Server::new(state).run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Run the server until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = build_router(self.state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?user_id=<id>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
