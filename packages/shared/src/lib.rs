//! Shared utilities for the Parley server and client.
//!
//! - `logger`: tracing subscriber setup
//! - `time`: clock abstraction and timestamp formatting
//! - `protocol`: JSON events exchanged over the WebSocket

pub mod logger;
pub mod protocol;
pub mod time;
