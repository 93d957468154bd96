use axum::{
    Router,
    routing::{get, patch, post},
};

use quill_core::health::{healthz, readyz};
use quill_core::middleware::request_id_layer;

use crate::handlers::{
    group::{
        add_user_to_group, create_group, list_group_members, list_groups, list_user_groups,
        remove_user_from_group,
    },
    permission::{
        check_user_permission, create_permission, grant_user_permission, list_permissions,
        list_user_permissions, revoke_user_permission,
    },
    user::{create_user, delete_user, get_user, list_users, update_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/{user_id}",
            get(get_user).delete(delete_user),
        )
        .route("/users/{user_id}", patch(update_user))
        // Group membership
        .route("/users/{user_id}/groups", get(list_user_groups))
        .route(
            "/users/{user_id}/groups/{group_id}",
            axum::routing::put(add_user_to_group).delete(remove_user_from_group),
        )
        // Permission grants
        .route("/users/{user_id}/permissions", get(list_user_permissions))
        .route(
            "/users/{user_id}/permissions/{permission}",
            get(check_user_permission)
                .put(grant_user_permission)
                .delete(revoke_user_permission),
        )
        // Groups
        .route("/groups", post(create_group).get(list_groups))
        .route("/groups/{group_id}/users", get(list_group_members))
        // Permissions
        .route("/permissions", post(create_permission).get(list_permissions))
        .layer(request_id_layer())
        .with_state(state)
}
