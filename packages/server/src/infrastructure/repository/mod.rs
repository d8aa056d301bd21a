//! Repository の実装
//!
//! - `inmemory`: HashMap / Vec を使ったインメモリ実装
//! - 将来的に: ドキュメントストアを使った実装

pub mod inmemory;

pub use inmemory::{InMemoryGroupRepository, InMemoryMessageRepository};
