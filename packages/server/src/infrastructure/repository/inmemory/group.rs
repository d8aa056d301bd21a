//! InMemory Group Repository 実装

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use parley_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    Group, GroupId, GroupIdFactory, GroupName, GroupRepository, RepositoryError, Timestamp, UserId,
};

/// インメモリ Group Repository 実装
pub struct InMemoryGroupRepository {
    groups: Mutex<HashMap<GroupId, Group>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryGroupRepository {
    /// 新しい InMemoryGroupRepository を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            groups: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// 既存のグループを登録（テストや初期データ投入用）
    pub async fn insert(&self, group: Group) {
        self.groups.lock().await.insert(group.id.clone(), group);
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn create(
        &self,
        name: GroupName,
        creator: UserId,
        member_ids: Vec<UserId>,
    ) -> Result<Group, RepositoryError> {
        let group = Group::new(
            GroupIdFactory::generate(),
            name,
            creator,
            member_ids,
            Timestamp::new(self.clock.now_millis()),
        );
        self.groups
            .lock()
            .await
            .insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn find(&self, group_id: &GroupId) -> Result<Group, RepositoryError> {
        self.groups
            .lock()
            .await
            .get(group_id)
            .cloned()
            .ok_or_else(|| RepositoryError::GroupNotFound(group_id.to_string()))
    }
}
