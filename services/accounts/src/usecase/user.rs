use chrono::Utc;
use uuid::Uuid;

use quill_domain::pagination::PageRequest;
use quill_domain::username::validate_username;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserPatch, UserSortBy};
use crate::error::AccountsServiceError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    /// The creation path: one `Utc::now()` instant stamps `date_joined`,
    /// `created_at`, and `updated_at`, so a fresh user always satisfies
    /// `created_at == updated_at`.
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, AccountsServiceError> {
        if !validate_username(&input.username) {
            return Err(AccountsServiceError::InvalidUsername);
        }
        if self
            .repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AccountsServiceError::UserAlreadyExists);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            password: input.password,
            email: input.email,
            is_active: true,
            is_staff: input.is_staff,
            is_superuser: input.is_superuser,
            date_joined: now,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, AccountsServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsServiceError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(
        &self,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Vec<User>, AccountsServiceError> {
        self.repo.list(sort_by, page).await
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        patch: UserPatch,
    ) -> Result<(), AccountsServiceError> {
        if patch.is_empty() {
            return Err(AccountsServiceError::MissingData);
        }
        self.repo.update(user_id, &patch).await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(), AccountsServiceError> {
        if !self.repo.delete(user_id).await? {
            return Err(AccountsServiceError::UserNotFound);
        }
        Ok(())
    }
}
