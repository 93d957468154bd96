#![allow(async_fn_in_trait)]

use uuid::Uuid;

use quill_domain::pagination::PageRequest;

use crate::domain::types::{Group, Permission, User, UserPatch, UserSortBy};
use crate::error::AccountsServiceError;

/// Repository for account principals.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AccountsServiceError>;
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, AccountsServiceError>;

    /// Insert a new user. A `username` unique violation surfaces as
    /// `UserAlreadyExists`, not as an internal error.
    async fn create(&self, user: &User) -> Result<(), AccountsServiceError>;

    /// Apply a partial update and stamp `updated_at`. `created_at` and
    /// `date_joined` are never written by this path.
    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<(), AccountsServiceError>;

    /// List users, default order `date_joined` descending.
    async fn list(
        &self,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Vec<User>, AccountsServiceError>;

    /// Delete a user. Returns `true` if a row was deleted. Join rows
    /// detach via FK cascade.
    async fn delete(&self, id: Uuid) -> Result<bool, AccountsServiceError>;
}

/// Repository for groups.
pub trait GroupRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, AccountsServiceError>;
    async fn create(&self, group: &Group) -> Result<(), AccountsServiceError>;
    async fn list(&self) -> Result<Vec<Group>, AccountsServiceError>;
}

/// Repository for permissions.
pub trait PermissionRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Permission>, AccountsServiceError>;
    async fn create(&self, permission: &Permission) -> Result<(), AccountsServiceError>;
    async fn list(&self) -> Result<Vec<Permission>, AccountsServiceError>;
}

/// Repository for group membership (the `user_groups` join table).
pub trait MembershipRepository: Send + Sync {
    /// Add a membership. Adding an already-present pair is a no-op.
    async fn add(&self, user_id: Uuid, group_id: Uuid) -> Result<(), AccountsServiceError>;

    /// Remove a membership. Returns `true` if a row was deleted;
    /// removing an absent pair is a no-op returning `false`.
    async fn remove(&self, user_id: Uuid, group_id: Uuid) -> Result<bool, AccountsServiceError>;

    async fn groups_of(&self, user_id: Uuid) -> Result<Vec<Group>, AccountsServiceError>;

    /// Reverse relation: users belonging to a group, default user
    /// ordering (`date_joined` descending).
    async fn members_of(
        &self,
        group_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, AccountsServiceError>;
}

/// Repository for direct permission grants (the `user_permissions` join
/// table) and effective-permission queries across `group_permissions`.
pub trait GrantRepository: Send + Sync {
    /// Grant a permission directly. Idempotent.
    async fn grant(&self, user_id: Uuid, permission_id: Uuid) -> Result<(), AccountsServiceError>;

    /// Revoke a direct grant. Returns `true` if a row was deleted.
    async fn revoke(
        &self,
        user_id: Uuid,
        permission_id: Uuid,
    ) -> Result<bool, AccountsServiceError>;

    /// Permissions granted directly to the user.
    async fn direct_of(&self, user_id: Uuid) -> Result<Vec<Permission>, AccountsServiceError>;

    /// Direct grants unioned with grants inherited through group
    /// membership, deduplicated.
    async fn effective_of(&self, user_id: Uuid) -> Result<Vec<Permission>, AccountsServiceError>;

    /// Whether the user holds the codename directly or through any group.
    async fn has(&self, user_id: Uuid, codename: &str) -> Result<bool, AccountsServiceError>;
}
