use chrono::{DateTime, Utc};
use uuid::Uuid;

use quill_domain::pagination::Sort;

/// Account principal owned by the accounts service.
///
/// The base identity fields (username, credential, email, status flags,
/// `date_joined`, `last_login`) are flat on the record; group and
/// permission assignments live in join tables and are reached through
/// the membership/grant repositories.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub email: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Named collection of permissions assignable to users.
#[derive(Debug, Clone)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
}

/// Atomic authorization grant.
#[derive(Debug, Clone)]
pub struct Permission {
    pub id: Uuid,
    pub codename: String,
    pub name: String,
}

/// Partial update applied to an existing user. `None` fields are left
/// untouched; the update path stamps `updated_at` regardless of which
/// fields changed.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.is_active.is_none()
    }
}

/// Sort options for user list queries.
#[derive(Debug, Clone, Copy)]
pub enum UserSortBy {
    DateJoined(Sort),
}

impl Default for UserSortBy {
    fn default() -> Self {
        Self::DateJoined(Sort::Desc)
    }
}

impl UserSortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "date-joined-desc" => Some(Self::DateJoined(Sort::Desc)),
            "date-joined-asc" => Some(Self::DateJoined(Sort::Asc)),
            _ => None,
        }
    }
}
