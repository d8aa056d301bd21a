//! Parley chat server.
//!
//! - `domain`: Value Object / Entity と、レジストリ・送信・ストアの抽象化
//! - `infrastructure`: インメモリ実装と WebSocket 送信、DTO
//! - `usecase`: 接続ライフサイクル、プレゼンス、リレー、REST 向けの処理
//! - `ui`: axum のルーティングとハンドラ

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
