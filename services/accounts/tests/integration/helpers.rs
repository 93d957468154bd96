use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use quill_accounts::domain::repository::{
    GrantRepository, GroupRepository, MembershipRepository, PermissionRepository, UserRepository,
};
use quill_accounts::domain::types::{Group, Permission, User, UserPatch, UserSortBy};
use quill_accounts::error::AccountsServiceError;
use quill_domain::pagination::{PageRequest, Sort};

// ── In-memory store ──────────────────────────────────────────────────────────

/// One shared store backing all five repository traits, so use cases
/// that span repositories (membership, grants) observe each other's
/// writes the way they would against one database.
#[derive(Default)]
pub struct Store {
    pub users: Vec<User>,
    pub groups: Vec<Group>,
    pub permissions: Vec<Permission>,
    pub memberships: HashSet<(Uuid, Uuid)>,
    pub user_grants: HashSet<(Uuid, Uuid)>,
    pub group_grants: HashSet<(Uuid, Uuid)>,
}

#[derive(Clone, Default)]
pub struct MemStore(pub Arc<Mutex<Store>>);

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user directly, bypassing the creation use case, so tests
    /// can control `date_joined`.
    pub fn insert_user(&self, username: &str, date_joined: DateTime<Utc>) -> User {
        let user = User {
            id: Uuid::now_v7(),
            username: username.to_owned(),
            password: "opaque".to_owned(),
            email: format!("{username}@example.com"),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            date_joined,
            last_login: None,
            created_at: date_joined,
            updated_at: date_joined,
        };
        self.0.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn insert_group(&self, name: &str) -> Group {
        let group = Group {
            id: Uuid::now_v7(),
            name: name.to_owned(),
        };
        self.0.lock().unwrap().groups.push(group.clone());
        group
    }

    pub fn insert_permission(&self, codename: &str) -> Permission {
        let permission = Permission {
            id: Uuid::now_v7(),
            codename: codename.to_owned(),
            name: codename.replace('_', " "),
        };
        self.0.lock().unwrap().permissions.push(permission.clone());
        permission
    }

    /// Attach a permission to a group (the `group_permissions` side,
    /// which has no use case in this service).
    pub fn grant_to_group(&self, group_id: Uuid, permission_id: Uuid) {
        self.0
            .lock()
            .unwrap()
            .group_grants
            .insert((group_id, permission_id));
    }

    pub fn membership_count(&self) -> usize {
        self.0.lock().unwrap().memberships.len()
    }
}

// ── UserRepository ───────────────────────────────────────────────────────────

impl UserRepository for MemStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AccountsServiceError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, AccountsServiceError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), AccountsServiceError> {
        let mut store = self.0.lock().unwrap();
        if store.users.iter().any(|u| u.username == user.username) {
            return Err(AccountsServiceError::UserAlreadyExists);
        }
        store.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<(), AccountsServiceError> {
        let mut store = self.0.lock().unwrap();
        let user = store
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AccountsServiceError::UserNotFound)?;
        if let Some(ref email) = patch.email {
            user.email = email.clone();
        }
        if let Some(ref password) = patch.password {
            user.password = password.clone();
        }
        if let Some(is_active) = patch.is_active {
            user.is_active = is_active;
        }
        // Same contract as the database repository: the update path
        // stamps updated_at and leaves created_at/date_joined alone.
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn list(
        &self,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Vec<User>, AccountsServiceError> {
        let mut users = self.0.lock().unwrap().users.clone();
        match sort_by {
            UserSortBy::DateJoined(Sort::Desc) => {
                users.sort_by(|a, b| (b.date_joined, b.id).cmp(&(a.date_joined, a.id)))
            }
            UserSortBy::DateJoined(Sort::Asc) => {
                users.sort_by(|a, b| (a.date_joined, a.id).cmp(&(b.date_joined, b.id)))
            }
        }
        Ok(users
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AccountsServiceError> {
        let mut store = self.0.lock().unwrap();
        let before = store.users.len();
        store.users.retain(|u| u.id != id);
        let deleted = store.users.len() < before;
        if deleted {
            // FK cascade: join rows detach with the user.
            store.memberships.retain(|(user_id, _)| *user_id != id);
            store.user_grants.retain(|(user_id, _)| *user_id != id);
        }
        Ok(deleted)
    }
}

// ── GroupRepository ──────────────────────────────────────────────────────────

impl GroupRepository for MemStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, AccountsServiceError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .groups
            .iter()
            .find(|g| g.id == id)
            .cloned())
    }

    async fn create(&self, group: &Group) -> Result<(), AccountsServiceError> {
        let mut store = self.0.lock().unwrap();
        if store.groups.iter().any(|g| g.name == group.name) {
            return Err(AccountsServiceError::GroupAlreadyExists);
        }
        store.groups.push(group.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Group>, AccountsServiceError> {
        let mut groups = self.0.lock().unwrap().groups.clone();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }
}

// ── PermissionRepository ─────────────────────────────────────────────────────

impl PermissionRepository for MemStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Permission>, AccountsServiceError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .permissions
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create(&self, permission: &Permission) -> Result<(), AccountsServiceError> {
        let mut store = self.0.lock().unwrap();
        if store
            .permissions
            .iter()
            .any(|p| p.codename == permission.codename)
        {
            return Err(AccountsServiceError::PermissionAlreadyExists);
        }
        store.permissions.push(permission.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Permission>, AccountsServiceError> {
        let mut permissions = self.0.lock().unwrap().permissions.clone();
        permissions.sort_by(|a, b| a.codename.cmp(&b.codename));
        Ok(permissions)
    }
}

// ── MembershipRepository ─────────────────────────────────────────────────────

impl MembershipRepository for MemStore {
    async fn add(&self, user_id: Uuid, group_id: Uuid) -> Result<(), AccountsServiceError> {
        self.0.lock().unwrap().memberships.insert((user_id, group_id));
        Ok(())
    }

    async fn remove(&self, user_id: Uuid, group_id: Uuid) -> Result<bool, AccountsServiceError> {
        Ok(self.0.lock().unwrap().memberships.remove(&(user_id, group_id)))
    }

    async fn groups_of(&self, user_id: Uuid) -> Result<Vec<Group>, AccountsServiceError> {
        let store = self.0.lock().unwrap();
        let mut groups: Vec<Group> = store
            .groups
            .iter()
            .filter(|g| store.memberships.contains(&(user_id, g.id)))
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    async fn members_of(
        &self,
        group_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, AccountsServiceError> {
        let store = self.0.lock().unwrap();
        let mut users: Vec<User> = store
            .users
            .iter()
            .filter(|u| store.memberships.contains(&(u.id, group_id)))
            .cloned()
            .collect();
        users.sort_by(|a, b| (b.date_joined, b.id).cmp(&(a.date_joined, a.id)));
        Ok(users
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }
}

// ── GrantRepository ──────────────────────────────────────────────────────────

impl GrantRepository for MemStore {
    async fn grant(
        &self,
        user_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), AccountsServiceError> {
        self.0
            .lock()
            .unwrap()
            .user_grants
            .insert((user_id, permission_id));
        Ok(())
    }

    async fn revoke(
        &self,
        user_id: Uuid,
        permission_id: Uuid,
    ) -> Result<bool, AccountsServiceError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .user_grants
            .remove(&(user_id, permission_id)))
    }

    async fn direct_of(&self, user_id: Uuid) -> Result<Vec<Permission>, AccountsServiceError> {
        let store = self.0.lock().unwrap();
        let mut permissions: Vec<Permission> = store
            .permissions
            .iter()
            .filter(|p| store.user_grants.contains(&(user_id, p.id)))
            .cloned()
            .collect();
        permissions.sort_by(|a, b| a.codename.cmp(&b.codename));
        Ok(permissions)
    }

    async fn effective_of(&self, user_id: Uuid) -> Result<Vec<Permission>, AccountsServiceError> {
        let store = self.0.lock().unwrap();
        let inherited = |p: &Permission| {
            store
                .memberships
                .iter()
                .filter(|(uid, _)| *uid == user_id)
                .any(|(_, gid)| store.group_grants.contains(&(*gid, p.id)))
        };
        let mut permissions: Vec<Permission> = store
            .permissions
            .iter()
            .filter(|p| store.user_grants.contains(&(user_id, p.id)) || inherited(p))
            .cloned()
            .collect();
        permissions.sort_by(|a, b| a.codename.cmp(&b.codename));
        Ok(permissions)
    }

    async fn has(&self, user_id: Uuid, codename: &str) -> Result<bool, AccountsServiceError> {
        Ok(self
            .effective_of(user_id)
            .await?
            .iter()
            .any(|p| p.codename == codename))
    }
}
