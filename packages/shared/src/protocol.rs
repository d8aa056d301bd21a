//! WebSocket wire protocol.
//!
//! Every frame is a JSON text message with a `type` tag.
//!
//! Server → client:
//!
//! ```text
//! {"type":"presence","online_user_ids":["u1","u2"]}
//! {"type":"message","message":{...}}
//! {"type":"typing","sender_id":"u1","is_typing":true}
//! ```
//!
//! Client → server:
//!
//! ```text
//! {"type":"typing","recipient_id":"u2","is_typing":true}
//! ```

use serde::{Deserialize, Serialize};

/// Events pushed from the server to a connected client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Full snapshot of the users currently online
    Presence { online_user_ids: Vec<String> },
    /// A message that has already been persisted
    Message { message: MessagePayload },
    /// Another user started or stopped typing to this client
    Typing { sender_id: String, is_typing: bool },
}

/// Events sent from a client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    Typing {
        recipient_id: String,
        is_typing: bool,
    },
}

/// Persisted message as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub id: String,
    pub sender_id: String,
    pub target: MessageTargetPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Unix timestamp (milliseconds)
    pub created_at: i64,
}

/// Destination of a message: exactly one user or one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageTargetPayload {
    Direct { recipient_id: String },
    Group { group_id: String },
}

impl ServerEvent {
    /// Encode the event as a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a JSON text frame
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl ClientEvent {
    /// Encode the event as a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a JSON text frame
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
