//! InMemory ConnectionRegistry 実装
//!
//! 正引き（UserId → ConnectionId）と逆引き（ConnectionId → UserId）の 2 つの
//! HashMap を 1 つの Mutex で保護します。どちらの方向の検索も O(1) です。
//!
//! 逆引きには上書きされた古い接続も残ります。古い接続が切断されたときに
//! 逆引きエントリだけを掃除し、正引き（新しい接続）には触れません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, ConnectionRegistry, UserId};

#[derive(Default)]
struct Entries {
    by_user: HashMap<UserId, ConnectionId>,
    by_connection: HashMap<ConnectionId, UserId>,
}

/// インメモリ ConnectionRegistry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    entries: Mutex<Entries>,
}

impl InMemoryConnectionRegistry {
    /// 空のレジストリを作成（全ユーザーがオフライン）
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, user_id: UserId, connection_id: ConnectionId) -> Option<ConnectionId> {
        let mut entries = self.entries.lock().await;
        entries
            .by_connection
            .insert(connection_id.clone(), user_id.clone());
        let superseded = entries.by_user.insert(user_id.clone(), connection_id.clone());

        match &superseded {
            Some(old) if old != &connection_id => tracing::info!(
                "User '{}' reconnected: connection '{}' supersedes '{}'",
                user_id,
                connection_id,
                old
            ),
            _ => tracing::debug!(
                "User '{}' registered with connection '{}'",
                user_id,
                connection_id
            ),
        }

        superseded.filter(|old| old != &connection_id)
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Option<UserId> {
        let mut entries = self.entries.lock().await;
        let user_id = entries.by_connection.remove(connection_id)?;

        if entries.by_user.get(&user_id) != Some(connection_id) {
            tracing::debug!(
                "Ignoring stale disconnect of '{}' for user '{}'",
                connection_id,
                user_id
            );
            return None;
        }

        entries.by_user.remove(&user_id);
        tracing::debug!(
            "User '{}' unregistered (connection '{}')",
            user_id,
            connection_id
        );
        Some(user_id)
    }

    async fn is_online(&self, user_id: &UserId) -> bool {
        self.entries.lock().await.by_user.contains_key(user_id)
    }

    async fn connection_of(&self, user_id: &UserId) -> Option<ConnectionId> {
        self.entries.lock().await.by_user.get(user_id).cloned()
    }

    async fn online_user_ids(&self) -> Vec<UserId> {
        let entries = self.entries.lock().await;
        let mut ids: Vec<UserId> = entries.by_user.keys().cloned().collect();
        ids.sort();
        ids
    }
}
