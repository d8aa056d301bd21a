//! UseCase: オンラインユーザー一覧の取得

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, UserId};

/// オンラインユーザー一覧取得のユースケース
pub struct GetOnlineUsersUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetOnlineUsersUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// オンラインのユーザー ID 一覧（ソート済み）
    pub async fn execute(&self) -> Vec<UserId> {
        self.registry.online_user_ids().await
    }
}
