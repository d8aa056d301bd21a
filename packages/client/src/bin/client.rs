//! Parley CLI chat client.
//!
//! Connects to the chat server as an already-authenticated user, shows live
//! presence, typing indicators and unread counters, and sends messages over REST.
//! Reconnects with exponential backoff when the connection is lost, and keeps
//! serving commands over REST while the WebSocket is down.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parley-client -- --user-id alice
//! cargo run --bin parley-client -- -u bob --url ws://127.0.0.1:3000/ws --api-url http://127.0.0.1:3000/api
//! ```

use clap::Parser;

use parley_client::{ClientConfig, run_client};
use parley_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "parley-client")]
#[command(about = "Chat client with live presence and typing indicators", long_about = None)]
struct Args {
    /// Authenticated user ID
    #[arg(short = 'u', long)]
    user_id: String,

    /// WebSocket server URL
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// REST API base URL
    #[arg(long, default_value = "http://127.0.0.1:8080/api")]
    api_url: String,

    /// Consecutive connection failures before falling back to REST only
    #[arg(long, default_value = "5")]
    max_reconnect_attempts: u32,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = ClientConfig {
        user_id: args.user_id,
        ws_url: args.url,
        api_url: args.api_url,
        max_reconnect_attempts: args.max_reconnect_attempts,
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
