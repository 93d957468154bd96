use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Permission;
use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::permission::{
    CreatePermissionInput, CreatePermissionUseCase, GrantPermissionUseCase, HasPermissionUseCase,
    ListPermissionsUseCase, ListUserPermissionsUseCase, RevokePermissionUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PermissionResponse {
    pub id: String,
    pub codename: String,
    pub name: String,
}

impl From<Permission> for PermissionResponse {
    fn from(permission: Permission) -> Self {
        Self {
            id: permission.id.to_string(),
            codename: permission.codename,
            name: permission.name,
        }
    }
}

// ── POST /permissions ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePermissionRequest {
    pub codename: String,
    pub name: String,
}

pub async fn create_permission(
    State(state): State<AppState>,
    Json(body): Json<CreatePermissionRequest>,
) -> Result<(StatusCode, Json<PermissionResponse>), AccountsServiceError> {
    let usecase = CreatePermissionUseCase {
        repo: state.permission_repo(),
    };
    let permission = usecase
        .execute(CreatePermissionInput {
            codename: body.codename,
            name: body.name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(permission.into())))
}

// ── GET /permissions ─────────────────────────────────────────────────────────

pub async fn list_permissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<PermissionResponse>>, AccountsServiceError> {
    let usecase = ListPermissionsUseCase {
        repo: state.permission_repo(),
    };
    let permissions = usecase.execute().await?;
    Ok(Json(permissions.into_iter().map(Into::into).collect()))
}

// ── GET /users/{id}/permissions ──────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UserPermissionsQuery {
    #[serde(default)]
    pub effective: bool,
}

pub async fn list_user_permissions(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<UserPermissionsQuery>,
) -> Result<Json<Vec<PermissionResponse>>, AccountsServiceError> {
    let usecase = ListUserPermissionsUseCase {
        users: state.user_repo(),
        grants: state.grant_repo(),
    };
    let permissions = usecase.execute(user_id, query.effective).await?;
    Ok(Json(permissions.into_iter().map(Into::into).collect()))
}

// ── GET /users/{id}/permissions/{codename} ───────────────────────────────────

#[derive(Serialize)]
pub struct HasPermissionResponse {
    pub codename: String,
    pub granted: bool,
}

pub async fn check_user_permission(
    State(state): State<AppState>,
    Path((user_id, codename)): Path<(Uuid, String)>,
) -> Result<Json<HasPermissionResponse>, AccountsServiceError> {
    let usecase = HasPermissionUseCase {
        users: state.user_repo(),
        grants: state.grant_repo(),
    };
    let granted = usecase.execute(user_id, &codename).await?;
    Ok(Json(HasPermissionResponse { codename, granted }))
}

// ── PUT /users/{id}/permissions/{permission_id} ──────────────────────────────

pub async fn grant_user_permission(
    State(state): State<AppState>,
    Path((user_id, permission_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = GrantPermissionUseCase {
        users: state.user_repo(),
        permissions: state.permission_repo(),
        grants: state.grant_repo(),
    };
    usecase.execute(user_id, permission_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /users/{id}/permissions/{permission_id} ───────────────────────────

pub async fn revoke_user_permission(
    State(state): State<AppState>,
    Path((user_id, permission_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = RevokePermissionUseCase {
        users: state.user_repo(),
        permissions: state.permission_repo(),
        grants: state.grant_repo(),
    };
    usecase.execute(user_id, permission_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
