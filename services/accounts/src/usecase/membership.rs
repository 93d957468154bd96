use uuid::Uuid;

use quill_domain::pagination::PageRequest;

use crate::domain::repository::{GroupRepository, MembershipRepository, UserRepository};
use crate::domain::types::{Group, User};
use crate::error::AccountsServiceError;

// ── AddUserToGroup ───────────────────────────────────────────────────────────

pub struct AddUserToGroupUseCase<U: UserRepository, G: GroupRepository, M: MembershipRepository> {
    pub users: U,
    pub groups: G,
    pub memberships: M,
}

impl<U: UserRepository, G: GroupRepository, M: MembershipRepository>
    AddUserToGroupUseCase<U, G, M>
{
    /// Idempotent: adding an already-present membership is a no-op
    /// success. Both ends must exist.
    pub async fn execute(&self, user_id: Uuid, group_id: Uuid) -> Result<(), AccountsServiceError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AccountsServiceError::UserNotFound);
        }
        if self.groups.find_by_id(group_id).await?.is_none() {
            return Err(AccountsServiceError::GroupNotFound);
        }
        self.memberships.add(user_id, group_id).await
    }
}

// ── RemoveUserFromGroup ──────────────────────────────────────────────────────

pub struct RemoveUserFromGroupUseCase<
    U: UserRepository,
    G: GroupRepository,
    M: MembershipRepository,
> {
    pub users: U,
    pub groups: G,
    pub memberships: M,
}

impl<U: UserRepository, G: GroupRepository, M: MembershipRepository>
    RemoveUserFromGroupUseCase<U, G, M>
{
    /// Idempotent: removing an absent membership succeeds.
    pub async fn execute(&self, user_id: Uuid, group_id: Uuid) -> Result<(), AccountsServiceError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AccountsServiceError::UserNotFound);
        }
        if self.groups.find_by_id(group_id).await?.is_none() {
            return Err(AccountsServiceError::GroupNotFound);
        }
        let _ = self.memberships.remove(user_id, group_id).await?;
        Ok(())
    }
}

// ── ListUserGroups ───────────────────────────────────────────────────────────

pub struct ListUserGroupsUseCase<U: UserRepository, M: MembershipRepository> {
    pub users: U,
    pub memberships: M,
}

impl<U: UserRepository, M: MembershipRepository> ListUserGroupsUseCase<U, M> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Group>, AccountsServiceError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AccountsServiceError::UserNotFound);
        }
        self.memberships.groups_of(user_id).await
    }
}

// ── ListGroupMembers ─────────────────────────────────────────────────────────

pub struct ListGroupMembersUseCase<G: GroupRepository, M: MembershipRepository> {
    pub groups: G,
    pub memberships: M,
}

impl<G: GroupRepository, M: MembershipRepository> ListGroupMembersUseCase<G, M> {
    /// The reverse relation: users of one group only, default user
    /// ordering.
    pub async fn execute(
        &self,
        group_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, AccountsServiceError> {
        if self.groups.find_by_id(group_id).await?.is_none() {
            return Err(AccountsServiceError::GroupNotFound);
        }
        self.memberships.members_of(group_id, page).await
    }
}
