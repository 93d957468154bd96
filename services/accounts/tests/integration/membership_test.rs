use chrono::{Duration, Utc};
use uuid::Uuid;

use quill_accounts::error::AccountsServiceError;
use quill_accounts::usecase::membership::{
    AddUserToGroupUseCase, ListGroupMembersUseCase, ListUserGroupsUseCase,
    RemoveUserFromGroupUseCase,
};
use quill_domain::pagination::PageRequest;

use crate::helpers::MemStore;

fn add_uc(store: &MemStore) -> AddUserToGroupUseCase<MemStore, MemStore, MemStore> {
    AddUserToGroupUseCase {
        users: store.clone(),
        groups: store.clone(),
        memberships: store.clone(),
    }
}

fn remove_uc(store: &MemStore) -> RemoveUserFromGroupUseCase<MemStore, MemStore, MemStore> {
    RemoveUserFromGroupUseCase {
        users: store.clone(),
        groups: store.clone(),
        memberships: store.clone(),
    }
}

#[tokio::test]
async fn should_keep_membership_a_set_under_repeated_adds() {
    let store = MemStore::new();
    let user = store.insert_user("alice", Utc::now());
    let group = store.insert_group("editors");

    add_uc(&store).execute(user.id, group.id).await.unwrap();
    add_uc(&store).execute(user.id, group.id).await.unwrap();

    let groups = ListUserGroupsUseCase {
        users: store.clone(),
        memberships: store.clone(),
    }
    .execute(user.id)
    .await
    .unwrap();
    assert_eq!(groups.len(), 1, "adding twice must not duplicate");

    // One remove empties the membership; a second remove is a no-op.
    remove_uc(&store).execute(user.id, group.id).await.unwrap();
    let groups = ListUserGroupsUseCase {
        users: store.clone(),
        memberships: store.clone(),
    }
    .execute(user.id)
    .await
    .unwrap();
    assert!(groups.is_empty());

    remove_uc(&store).execute(user.id, group.id).await.unwrap();
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_user() {
    let store = MemStore::new();
    let group = store.insert_group("editors");

    let result = add_uc(&store).execute(Uuid::now_v7(), group.id).await;
    assert!(matches!(result, Err(AccountsServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_return_group_not_found_for_unknown_group() {
    let store = MemStore::new();
    let user = store.insert_user("alice", Utc::now());

    let result = add_uc(&store).execute(user.id, Uuid::now_v7()).await;
    assert!(matches!(result, Err(AccountsServiceError::GroupNotFound)));
}

#[tokio::test]
async fn should_list_only_that_groups_members_in_join_order() {
    let store = MemStore::new();
    let base = Utc::now();
    let alice = store.insert_user("alice", base - Duration::hours(3));
    let bob = store.insert_user("bob", base - Duration::hours(2));
    let carol = store.insert_user("carol", base - Duration::hours(1));
    let editors = store.insert_group("editors");
    let reviewers = store.insert_group("reviewers");

    add_uc(&store).execute(alice.id, editors.id).await.unwrap();
    add_uc(&store).execute(carol.id, editors.id).await.unwrap();
    add_uc(&store).execute(bob.id, reviewers.id).await.unwrap();

    let members = ListGroupMembersUseCase {
        groups: store.clone(),
        memberships: store.clone(),
    }
    .execute(editors.id, PageRequest::default())
    .await
    .unwrap();

    // Only editors, most recently joined first; no leakage from the
    // other group's membership.
    let usernames: Vec<&str> = members.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(usernames, ["carol", "alice"]);
}

#[tokio::test]
async fn should_return_group_not_found_when_listing_unknown_group_members() {
    let store = MemStore::new();
    let result = ListGroupMembersUseCase {
        groups: store.clone(),
        memberships: store.clone(),
    }
    .execute(Uuid::now_v7(), PageRequest::default())
    .await;
    assert!(matches!(result, Err(AccountsServiceError::GroupNotFound)));
}
