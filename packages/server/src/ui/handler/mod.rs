//! HTTP / WebSocket handlers.

mod auth;
mod error;
mod http;
mod websocket;

pub use http::{
    create_group, get_direct_messages, get_group_messages, get_online_users, health_check,
    send_direct_message, send_group_message,
};
pub use websocket::websocket_handler;
