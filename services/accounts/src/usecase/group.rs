use uuid::Uuid;

use crate::domain::repository::GroupRepository;
use crate::domain::types::Group;
use crate::error::AccountsServiceError;

// ── CreateGroup ──────────────────────────────────────────────────────────────

pub struct CreateGroupInput {
    pub name: String,
}

pub struct CreateGroupUseCase<R: GroupRepository> {
    pub repo: R,
}

impl<R: GroupRepository> CreateGroupUseCase<R> {
    pub async fn execute(&self, input: CreateGroupInput) -> Result<Group, AccountsServiceError> {
        if input.name.trim().is_empty() {
            return Err(AccountsServiceError::MissingData);
        }
        let group = Group {
            id: Uuid::now_v7(),
            name: input.name,
        };
        self.repo.create(&group).await?;
        Ok(group)
    }
}

// ── ListGroups ───────────────────────────────────────────────────────────────

pub struct ListGroupsUseCase<R: GroupRepository> {
    pub repo: R,
}

impl<R: GroupRepository> ListGroupsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Group>, AccountsServiceError> {
        self.repo.list().await
    }
}
