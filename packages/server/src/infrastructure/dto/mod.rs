//! Data Transfer Objects (DTOs).
//!
//! - `http`: HTTP API request/response DTOs
//! - `conversion`: Domain Model ↔ wire DTO conversion
//!
//! WebSocket event DTOs live in `parley_shared::protocol` so the client can share them.

pub mod conversion;
pub mod http;
