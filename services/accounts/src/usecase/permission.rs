use uuid::Uuid;

use crate::domain::repository::{GrantRepository, PermissionRepository, UserRepository};
use crate::domain::types::Permission;
use crate::error::AccountsServiceError;

// ── CreatePermission ─────────────────────────────────────────────────────────

pub struct CreatePermissionInput {
    pub codename: String,
    pub name: String,
}

pub struct CreatePermissionUseCase<R: PermissionRepository> {
    pub repo: R,
}

impl<R: PermissionRepository> CreatePermissionUseCase<R> {
    pub async fn execute(
        &self,
        input: CreatePermissionInput,
    ) -> Result<Permission, AccountsServiceError> {
        if input.codename.trim().is_empty() {
            return Err(AccountsServiceError::MissingData);
        }
        let permission = Permission {
            id: Uuid::now_v7(),
            codename: input.codename,
            name: input.name,
        };
        self.repo.create(&permission).await?;
        Ok(permission)
    }
}

// ── ListPermissions ──────────────────────────────────────────────────────────

pub struct ListPermissionsUseCase<R: PermissionRepository> {
    pub repo: R,
}

impl<R: PermissionRepository> ListPermissionsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Permission>, AccountsServiceError> {
        self.repo.list().await
    }
}

// ── GrantPermission ──────────────────────────────────────────────────────────

pub struct GrantPermissionUseCase<U: UserRepository, P: PermissionRepository, G: GrantRepository> {
    pub users: U,
    pub permissions: P,
    pub grants: G,
}

impl<U: UserRepository, P: PermissionRepository, G: GrantRepository>
    GrantPermissionUseCase<U, P, G>
{
    /// Idempotent: granting an already-held permission is a no-op
    /// success.
    pub async fn execute(
        &self,
        user_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), AccountsServiceError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AccountsServiceError::UserNotFound);
        }
        if self.permissions.find_by_id(permission_id).await?.is_none() {
            return Err(AccountsServiceError::PermissionNotFound);
        }
        self.grants.grant(user_id, permission_id).await
    }
}

// ── RevokePermission ─────────────────────────────────────────────────────────

pub struct RevokePermissionUseCase<U: UserRepository, P: PermissionRepository, G: GrantRepository>
{
    pub users: U,
    pub permissions: P,
    pub grants: G,
}

impl<U: UserRepository, P: PermissionRepository, G: GrantRepository>
    RevokePermissionUseCase<U, P, G>
{
    /// Idempotent: revoking an absent grant succeeds.
    pub async fn execute(
        &self,
        user_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), AccountsServiceError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AccountsServiceError::UserNotFound);
        }
        if self.permissions.find_by_id(permission_id).await?.is_none() {
            return Err(AccountsServiceError::PermissionNotFound);
        }
        let _ = self.grants.revoke(user_id, permission_id).await?;
        Ok(())
    }
}

// ── ListUserPermissions ──────────────────────────────────────────────────────

pub struct ListUserPermissionsUseCase<U: UserRepository, G: GrantRepository> {
    pub users: U,
    pub grants: G,
}

impl<U: UserRepository, G: GrantRepository> ListUserPermissionsUseCase<U, G> {
    /// `effective` widens the listing from direct grants to the union
    /// of direct and group-inherited grants.
    pub async fn execute(
        &self,
        user_id: Uuid,
        effective: bool,
    ) -> Result<Vec<Permission>, AccountsServiceError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AccountsServiceError::UserNotFound);
        }
        if effective {
            self.grants.effective_of(user_id).await
        } else {
            self.grants.direct_of(user_id).await
        }
    }
}

// ── HasPermission ────────────────────────────────────────────────────────────

pub struct HasPermissionUseCase<U: UserRepository, G: GrantRepository> {
    pub users: U,
    pub grants: G,
}

impl<U: UserRepository, G: GrantRepository> HasPermissionUseCase<U, G> {
    /// Unknown codenames are simply not held; only the user must exist.
    pub async fn execute(
        &self,
        user_id: Uuid,
        codename: &str,
    ) -> Result<bool, AccountsServiceError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AccountsServiceError::UserNotFound);
        }
        self.grants.has(user_id, codename).await
    }
}
