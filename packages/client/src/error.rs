//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not establish the WebSocket connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection was lost
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// REST API call failed
    #[error("API error: {0}")]
    Api(String),

    /// Input line could not be parsed as a command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Event could not be encoded
    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Api(e.to_string())
    }
}
