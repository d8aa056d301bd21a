//! UseCase: グループ作成

use std::sync::Arc;

use crate::domain::{Group, GroupName, GroupRepository, UserId};

use super::error::CreateGroupError;

/// グループ作成のユースケース
pub struct CreateGroupUseCase {
    groups: Arc<dyn GroupRepository>,
}

impl CreateGroupUseCase {
    /// 新しい CreateGroupUseCase を作成
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    /// グループを作成（作成者は自動的にメンバーになる）
    pub async fn execute(
        &self,
        creator: UserId,
        name: String,
        member_ids: Vec<String>,
    ) -> Result<Group, CreateGroupError> {
        let name = GroupName::new(name)?;
        if member_ids.is_empty() {
            return Err(CreateGroupError::NoMembers);
        }
        let members = member_ids
            .into_iter()
            .map(UserId::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let group = self.groups.create(name, creator, members).await?;
        tracing::info!(
            "Group '{}' ({}) created with {} members",
            group.name.as_str(),
            group.id,
            group.members.len()
        );
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::ValueObjectError, infrastructure::repository::InMemoryGroupRepository};
    use parley_shared::time::FixedClock;

    fn create_usecase() -> CreateGroupUseCase {
        CreateGroupUseCase::new(Arc::new(InMemoryGroupRepository::new(Arc::new(
            FixedClock::new(0),
        ))))
    }

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_group_success() {
        // テスト項目: 作成者を含むグループが作成される
        // given (前提条件):
        let usecase = create_usecase();

        // when (操作):
        let group = usecase
            .execute(
                user("u1"),
                "weekend".to_string(),
                vec!["u2".to_string(), "u3".to_string()],
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(group.name.as_str(), "weekend");
        assert_eq!(group.members, vec![user("u1"), user("u2"), user("u3")]);
    }

    #[tokio::test]
    async fn test_create_group_requires_members() {
        // テスト項目: メンバー指定なしのグループ作成は拒否される
        // given (前提条件):
        let usecase = create_usecase();

        // when (操作):
        let result = usecase.execute(user("u1"), "solo".to_string(), vec![]).await;

        // then (期待する結果):
        assert_eq!(result, Err(CreateGroupError::NoMembers));
    }

    #[tokio::test]
    async fn test_create_group_rejects_invalid_member_id() {
        // テスト項目: 不正なメンバー ID を含むグループ作成は拒否される
        // given (前提条件):
        let usecase = create_usecase();

        // when (操作):
        let result = usecase
            .execute(user("u1"), "team".to_string(), vec!["undefined".to_string()])
            .await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(CreateGroupError::InvalidInput(ValueObjectError::InvalidId { .. }))
        ));
    }
}
