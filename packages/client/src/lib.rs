//! Parley CLI chat client.
//!
//! - `consumer`: プレゼンス・入力中・未読の状態を持つ `ChatView`
//! - `command`: 入力行のパース
//! - `api` / `endpoint`: REST API クライアントと URL の組み立て
//! - `handler`: 入力行の処理（接続中・切断中の共通部分）
//! - `typing`: 入力中シグナルの送信状態と自動停止
//! - `runner` / `session`: WebSocket セッションと再接続

pub mod api;
pub mod command;
pub mod consumer;
mod domain;
pub mod endpoint;
pub mod error;
mod formatter;
mod handler;
mod runner;
mod session;
mod typing;
mod ui;

pub use runner::{ClientConfig, run_client};
