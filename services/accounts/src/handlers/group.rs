use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_domain::pagination::PageRequest;

use crate::domain::types::Group;
use crate::error::AccountsServiceError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::group::{CreateGroupInput, CreateGroupUseCase, ListGroupsUseCase};
use crate::usecase::membership::{
    AddUserToGroupUseCase, ListGroupMembersUseCase, ListUserGroupsUseCase,
    RemoveUserFromGroupUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.id.to_string(),
            name: group.name,
        }
    }
}

// ── POST /groups ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

pub async fn create_group(
    State(state): State<AppState>,
    Json(body): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupResponse>), AccountsServiceError> {
    let usecase = CreateGroupUseCase {
        repo: state.group_repo(),
    };
    let group = usecase.execute(CreateGroupInput { name: body.name }).await?;
    Ok((StatusCode::CREATED, Json(group.into())))
}

// ── GET /groups ──────────────────────────────────────────────────────────────

pub async fn list_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupResponse>>, AccountsServiceError> {
    let usecase = ListGroupsUseCase {
        repo: state.group_repo(),
    };
    let groups = usecase.execute().await?;
    Ok(Json(groups.into_iter().map(Into::into).collect()))
}

// ── GET /groups/{id}/users ───────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct MemberListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_group_members(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Query(query): Query<MemberListQuery>,
) -> Result<Json<Vec<UserResponse>>, AccountsServiceError> {
    let mut page = PageRequest::default();
    if let Some(per_page) = query.per_page {
        page.per_page = per_page;
    }
    if let Some(p) = query.page {
        page.page = p;
    }
    let usecase = ListGroupMembersUseCase {
        groups: state.group_repo(),
        memberships: state.membership_repo(),
    };
    let members = usecase.execute(group_id, page.clamped()).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

// ── GET /users/{id}/groups ───────────────────────────────────────────────────

pub async fn list_user_groups(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<GroupResponse>>, AccountsServiceError> {
    let usecase = ListUserGroupsUseCase {
        users: state.user_repo(),
        memberships: state.membership_repo(),
    };
    let groups = usecase.execute(user_id).await?;
    Ok(Json(groups.into_iter().map(Into::into).collect()))
}

// ── PUT /users/{id}/groups/{group_id} ────────────────────────────────────────

pub async fn add_user_to_group(
    State(state): State<AppState>,
    Path((user_id, group_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = AddUserToGroupUseCase {
        users: state.user_repo(),
        groups: state.group_repo(),
        memberships: state.membership_repo(),
    };
    usecase.execute(user_id, group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /users/{id}/groups/{group_id} ─────────────────────────────────────

pub async fn remove_user_from_group(
    State(state): State<AppState>,
    Path((user_id, group_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = RemoveUserFromGroupUseCase {
        users: state.user_repo(),
        groups: state.group_repo(),
        memberships: state.membership_repo(),
    };
    usecase.execute(user_id, group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
