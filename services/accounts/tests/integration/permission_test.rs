use chrono::Utc;
use uuid::Uuid;

use quill_accounts::error::AccountsServiceError;
use quill_accounts::usecase::membership::AddUserToGroupUseCase;
use quill_accounts::usecase::permission::{
    GrantPermissionUseCase, HasPermissionUseCase, ListUserPermissionsUseCase,
    RevokePermissionUseCase,
};

use crate::helpers::MemStore;

fn grant_uc(store: &MemStore) -> GrantPermissionUseCase<MemStore, MemStore, MemStore> {
    GrantPermissionUseCase {
        users: store.clone(),
        permissions: store.clone(),
        grants: store.clone(),
    }
}

fn list_uc(store: &MemStore) -> ListUserPermissionsUseCase<MemStore, MemStore> {
    ListUserPermissionsUseCase {
        users: store.clone(),
        grants: store.clone(),
    }
}

#[tokio::test]
async fn should_grant_idempotently() {
    let store = MemStore::new();
    let user = store.insert_user("alice", Utc::now());
    let perm = store.insert_permission("can_publish");

    grant_uc(&store).execute(user.id, perm.id).await.unwrap();
    grant_uc(&store).execute(user.id, perm.id).await.unwrap();

    let direct = list_uc(&store).execute(user.id, false).await.unwrap();
    assert_eq!(direct.len(), 1);
    assert_eq!(direct[0].codename, "can_publish");
}

#[tokio::test]
async fn should_include_group_inherited_grants_in_effective_listing() {
    let store = MemStore::new();
    let user = store.insert_user("alice", Utc::now());
    let group = store.insert_group("editors");
    let direct_perm = store.insert_permission("can_publish");
    let group_perm = store.insert_permission("can_review");

    grant_uc(&store)
        .execute(user.id, direct_perm.id)
        .await
        .unwrap();
    AddUserToGroupUseCase {
        users: store.clone(),
        groups: store.clone(),
        memberships: store.clone(),
    }
    .execute(user.id, group.id)
    .await
    .unwrap();
    store.grant_to_group(group.id, group_perm.id);

    let direct = list_uc(&store).execute(user.id, false).await.unwrap();
    let codenames: Vec<&str> = direct.iter().map(|p| p.codename.as_str()).collect();
    assert_eq!(codenames, ["can_publish"]);

    let effective = list_uc(&store).execute(user.id, true).await.unwrap();
    let codenames: Vec<&str> = effective.iter().map(|p| p.codename.as_str()).collect();
    assert_eq!(codenames, ["can_publish", "can_review"]);
}

#[tokio::test]
async fn should_dedup_permission_held_directly_and_through_group() {
    let store = MemStore::new();
    let user = store.insert_user("alice", Utc::now());
    let group = store.insert_group("editors");
    let perm = store.insert_permission("can_publish");

    grant_uc(&store).execute(user.id, perm.id).await.unwrap();
    AddUserToGroupUseCase {
        users: store.clone(),
        groups: store.clone(),
        memberships: store.clone(),
    }
    .execute(user.id, group.id)
    .await
    .unwrap();
    store.grant_to_group(group.id, perm.id);

    let effective = list_uc(&store).execute(user.id, true).await.unwrap();
    assert_eq!(effective.len(), 1);
}

#[tokio::test]
async fn should_check_permission_through_group_membership() {
    let store = MemStore::new();
    let user = store.insert_user("alice", Utc::now());
    let group = store.insert_group("editors");
    let perm = store.insert_permission("can_review");

    AddUserToGroupUseCase {
        users: store.clone(),
        groups: store.clone(),
        memberships: store.clone(),
    }
    .execute(user.id, group.id)
    .await
    .unwrap();
    store.grant_to_group(group.id, perm.id);

    let uc = HasPermissionUseCase {
        users: store.clone(),
        grants: store.clone(),
    };
    assert!(uc.execute(user.id, "can_review").await.unwrap());
    assert!(!uc.execute(user.id, "can_publish").await.unwrap());
}

#[tokio::test]
async fn should_return_permission_not_found_when_granting_unknown_permission() {
    let store = MemStore::new();
    let user = store.insert_user("alice", Utc::now());

    let result = grant_uc(&store).execute(user.id, Uuid::now_v7()).await;
    assert!(matches!(
        result,
        Err(AccountsServiceError::PermissionNotFound)
    ));
}

#[tokio::test]
async fn should_treat_revoking_absent_grant_as_no_op() {
    let store = MemStore::new();
    let user = store.insert_user("alice", Utc::now());
    let perm = store.insert_permission("can_publish");

    RevokePermissionUseCase {
        users: store.clone(),
        permissions: store.clone(),
        grants: store.clone(),
    }
    .execute(user.id, perm.id)
    .await
    .unwrap();
}
