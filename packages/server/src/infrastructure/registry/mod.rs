//! ConnectionRegistry の実装
//!
//! - `inmemory`: プロセス内の HashMap を使った実装
//!
//! 複数ノード構成では共有ストア（KVS など）への移行とノード間のファンアウトが必要になる。

pub mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;
