use chrono::{Duration, Utc};
use uuid::Uuid;

use quill_accounts::domain::types::{UserPatch, UserSortBy};
use quill_accounts::error::AccountsServiceError;
use quill_accounts::usecase::membership::AddUserToGroupUseCase;
use quill_accounts::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateUserUseCase,
};
use quill_domain::pagination::PageRequest;

use crate::helpers::MemStore;

fn create_input(username: &str) -> CreateUserInput {
    CreateUserInput {
        username: username.to_owned(),
        password: "opaque".to_owned(),
        email: format!("{username}@example.com"),
        is_staff: false,
        is_superuser: false,
    }
}

#[tokio::test]
async fn should_create_user_with_equal_timestamps() {
    let store = MemStore::new();
    let uc = CreateUserUseCase {
        repo: store.clone(),
    };
    let created = uc.execute(create_input("alice")).await.unwrap();

    let persisted = GetUserUseCase {
        repo: store.clone(),
    }
    .execute(created.id)
    .await
    .unwrap();

    assert_eq!(persisted.created_at, persisted.updated_at);
    assert_eq!(persisted.created_at, persisted.date_joined);
    assert!(persisted.last_login.is_none());
}

#[tokio::test]
async fn should_surface_duplicate_username_as_validation_error() {
    let store = MemStore::new();
    let uc = CreateUserUseCase {
        repo: store.clone(),
    };
    uc.execute(create_input("alice")).await.unwrap();
    let result = uc.execute(create_input("alice")).await;

    assert!(
        matches!(result, Err(AccountsServiceError::UserAlreadyExists)),
        "expected UserAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_advance_updated_at_and_preserve_created_at_on_update() {
    let store = MemStore::new();
    let created = CreateUserUseCase {
        repo: store.clone(),
    }
    .execute(create_input("alice"))
    .await
    .unwrap();

    // Make the clock move past timestamp granularity.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    UpdateUserUseCase {
        repo: store.clone(),
    }
    .execute(
        created.id,
        UserPatch {
            email: Some("new@example.com".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let persisted = GetUserUseCase {
        repo: store.clone(),
    }
    .execute(created.id)
    .await
    .unwrap();

    assert_eq!(persisted.created_at, created.created_at);
    assert_eq!(persisted.date_joined, created.date_joined);
    assert!(persisted.updated_at > persisted.created_at);
    assert_eq!(persisted.email, "new@example.com");
}

#[tokio::test]
async fn should_list_most_recently_joined_first() {
    let store = MemStore::new();
    let base = Utc::now();
    store.insert_user("first", base - Duration::hours(3));
    store.insert_user("second", base - Duration::hours(2));
    store.insert_user("third", base - Duration::hours(1));

    let users = ListUsersUseCase {
        repo: store.clone(),
    }
    .execute(UserSortBy::default(), PageRequest::default())
    .await
    .unwrap();

    let usernames: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(usernames, ["third", "second", "first"]);
}

#[tokio::test]
async fn should_detach_memberships_when_user_deleted() {
    let store = MemStore::new();
    let user = CreateUserUseCase {
        repo: store.clone(),
    }
    .execute(create_input("alice"))
    .await
    .unwrap();
    let group = store.insert_group("editors");

    AddUserToGroupUseCase {
        users: store.clone(),
        groups: store.clone(),
        memberships: store.clone(),
    }
    .execute(user.id, group.id)
    .await
    .unwrap();
    assert_eq!(store.membership_count(), 1);

    DeleteUserUseCase {
        repo: store.clone(),
    }
    .execute(user.id)
    .await
    .unwrap();

    // Membership rows detach; the group itself survives.
    assert_eq!(store.membership_count(), 0);
    let get_result = GetUserUseCase {
        repo: store.clone(),
    }
    .execute(user.id)
    .await;
    assert!(matches!(
        get_result,
        Err(AccountsServiceError::UserNotFound)
    ));
}

#[tokio::test]
async fn should_return_not_found_when_deleting_unknown_user() {
    let store = MemStore::new();
    let result = DeleteUserUseCase {
        repo: store.clone(),
    }
    .execute(Uuid::now_v7())
    .await;
    assert!(matches!(result, Err(AccountsServiceError::UserNotFound)));
}
