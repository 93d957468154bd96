use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    SqlErr, Statement, sea_query::OnConflict,
};
use uuid::Uuid;

use quill_accounts_schema::{
    group_permissions, groups, permissions, user_groups, user_permissions, users,
};
use quill_domain::pagination::{PageRequest, Sort};

use crate::domain::repository::{
    GrantRepository, GroupRepository, MembershipRepository, PermissionRepository, UserRepository,
};
use crate::domain::types::{Group, Permission, User, UserPatch, UserSortBy};
use crate::error::AccountsServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), AccountsServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            password: Set(user.password.clone()),
            email: Set(user.email.clone()),
            is_active: Set(user.is_active),
            is_staff: Set(user.is_staff),
            is_superuser: Set(user.is_superuser),
            date_joined: Set(user.date_joined),
            last_login: Set(user.last_login),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AccountsServiceError::UserAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<(), AccountsServiceError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref email) = patch.email {
            am.email = Set(email.clone());
        }
        if let Some(ref password) = patch.password {
            am.password = Set(password.clone());
        }
        if let Some(is_active) = patch.is_active {
            am.is_active = Set(is_active);
        }
        // The update path stamps updated_at; created_at and date_joined
        // are written only by the creation path.
        am.updated_at = Set(Utc::now());
        match am.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(AccountsServiceError::UserNotFound),
            Err(e) => Err(anyhow::Error::new(e).context("update user").into()),
        }
    }

    async fn list(
        &self,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Vec<User>, AccountsServiceError> {
        let query = users::Entity::find();
        let query = match sort_by {
            UserSortBy::DateJoined(Sort::Desc) => query
                .order_by_desc(users::Column::DateJoined)
                .order_by_desc(users::Column::Id),
            UserSortBy::DateJoined(Sort::Asc) => query
                .order_by_asc(users::Column::DateJoined)
                .order_by_asc(users::Column::Id),
        };
        let models = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AccountsServiceError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password: model.password,
        email: model.email,
        is_active: model.is_active,
        is_staff: model.is_staff,
        is_superuser: model.is_superuser,
        date_joined: model.date_joined,
        last_login: model.last_login,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Group repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGroupRepository {
    pub db: DatabaseConnection,
}

impl GroupRepository for DbGroupRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, AccountsServiceError> {
        let model = groups::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find group by id")?;
        Ok(model.map(group_from_model))
    }

    async fn create(&self, group: &Group) -> Result<(), AccountsServiceError> {
        let result = groups::ActiveModel {
            id: Set(group.id),
            name: Set(group.name.clone()),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AccountsServiceError::GroupAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create group").into()),
        }
    }

    async fn list(&self) -> Result<Vec<Group>, AccountsServiceError> {
        let models = groups::Entity::find()
            .order_by_asc(groups::Column::Name)
            .all(&self.db)
            .await
            .context("list groups")?;
        Ok(models.into_iter().map(group_from_model).collect())
    }
}

fn group_from_model(model: groups::Model) -> Group {
    Group {
        id: model.id,
        name: model.name,
    }
}

// ── Permission repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPermissionRepository {
    pub db: DatabaseConnection,
}

impl PermissionRepository for DbPermissionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Permission>, AccountsServiceError> {
        let model = permissions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find permission by id")?;
        Ok(model.map(permission_from_model))
    }

    async fn create(&self, permission: &Permission) -> Result<(), AccountsServiceError> {
        let result = permissions::ActiveModel {
            id: Set(permission.id),
            codename: Set(permission.codename.clone()),
            name: Set(permission.name.clone()),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AccountsServiceError::PermissionAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create permission").into()),
        }
    }

    async fn list(&self) -> Result<Vec<Permission>, AccountsServiceError> {
        let models = permissions::Entity::find()
            .order_by_asc(permissions::Column::Codename)
            .all(&self.db)
            .await
            .context("list permissions")?;
        Ok(models.into_iter().map(permission_from_model).collect())
    }
}

fn permission_from_model(model: permissions::Model) -> Permission {
    Permission {
        id: model.id,
        codename: model.codename,
        name: model.name,
    }
}

// ── Membership repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMembershipRepository {
    pub db: DatabaseConnection,
}

impl MembershipRepository for DbMembershipRepository {
    async fn add(&self, user_id: Uuid, group_id: Uuid) -> Result<(), AccountsServiceError> {
        let row = user_groups::ActiveModel {
            user_id: Set(user_id),
            group_id: Set(group_id),
            created_at: Set(Utc::now()),
        };
        user_groups::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([user_groups::Column::UserId, user_groups::Column::GroupId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("add group membership")?;
        Ok(())
    }

    async fn remove(&self, user_id: Uuid, group_id: Uuid) -> Result<bool, AccountsServiceError> {
        let result = user_groups::Entity::delete_many()
            .filter(user_groups::Column::UserId.eq(user_id))
            .filter(user_groups::Column::GroupId.eq(group_id))
            .exec(&self.db)
            .await
            .context("remove group membership")?;
        Ok(result.rows_affected > 0)
    }

    async fn groups_of(&self, user_id: Uuid) -> Result<Vec<Group>, AccountsServiceError> {
        let models = groups::Entity::find()
            .join(JoinType::InnerJoin, user_groups::Relation::Group.def().rev())
            .filter(user_groups::Column::UserId.eq(user_id))
            .order_by_asc(groups::Column::Name)
            .all(&self.db)
            .await
            .context("list groups of user")?;
        Ok(models.into_iter().map(group_from_model).collect())
    }

    async fn members_of(
        &self,
        group_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, AccountsServiceError> {
        let models = users::Entity::find()
            .join(JoinType::InnerJoin, user_groups::Relation::User.def().rev())
            .filter(user_groups::Column::GroupId.eq(group_id))
            .order_by_desc(users::Column::DateJoined)
            .order_by_desc(users::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list members of group")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

// ── Grant repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGrantRepository {
    pub db: DatabaseConnection,
}

impl GrantRepository for DbGrantRepository {
    async fn grant(
        &self,
        user_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), AccountsServiceError> {
        let row = user_permissions::ActiveModel {
            user_id: Set(user_id),
            permission_id: Set(permission_id),
            created_at: Set(Utc::now()),
        };
        user_permissions::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    user_permissions::Column::UserId,
                    user_permissions::Column::PermissionId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("grant permission")?;
        Ok(())
    }

    async fn revoke(
        &self,
        user_id: Uuid,
        permission_id: Uuid,
    ) -> Result<bool, AccountsServiceError> {
        let result = user_permissions::Entity::delete_many()
            .filter(user_permissions::Column::UserId.eq(user_id))
            .filter(user_permissions::Column::PermissionId.eq(permission_id))
            .exec(&self.db)
            .await
            .context("revoke permission")?;
        Ok(result.rows_affected > 0)
    }

    async fn direct_of(&self, user_id: Uuid) -> Result<Vec<Permission>, AccountsServiceError> {
        let models = permissions::Entity::find()
            .join(
                JoinType::InnerJoin,
                user_permissions::Relation::Permission.def().rev(),
            )
            .filter(user_permissions::Column::UserId.eq(user_id))
            .order_by_asc(permissions::Column::Codename)
            .all(&self.db)
            .await
            .context("list direct permissions")?;
        Ok(models.into_iter().map(permission_from_model).collect())
    }

    async fn effective_of(&self, user_id: Uuid) -> Result<Vec<Permission>, AccountsServiceError> {
        // Direct grants unioned with group-inherited grants; UNION (not
        // UNION ALL) deduplicates a permission held both ways.
        let sql = r#"
            SELECT p.id, p.codename, p.name
                FROM permissions p
                INNER JOIN user_permissions up ON up.permission_id = p.id
                WHERE up.user_id = $1
            UNION
            SELECT p.id, p.codename, p.name
                FROM permissions p
                INNER JOIN group_permissions gp ON gp.permission_id = p.id
                INNER JOIN user_groups ug ON ug.group_id = gp.group_id
                WHERE ug.user_id = $1
            ORDER BY codename
        "#;

        #[derive(Debug, FromQueryResult)]
        struct PermissionRow {
            id: Uuid,
            codename: String,
            name: String,
        }

        let rows = PermissionRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [user_id.into()],
        ))
        .all(&self.db)
        .await
        .context("list effective permissions (UNION)")?;

        Ok(rows
            .into_iter()
            .map(|row| Permission {
                id: row.id,
                codename: row.codename,
                name: row.name,
            })
            .collect())
    }

    async fn has(&self, user_id: Uuid, codename: &str) -> Result<bool, AccountsServiceError> {
        let sql = r#"
            SELECT EXISTS(
                SELECT 1
                    FROM user_permissions up
                    INNER JOIN permissions p ON p.id = up.permission_id
                    WHERE up.user_id = $1 AND p.codename = $2
                UNION ALL
                SELECT 1
                    FROM user_groups ug
                    INNER JOIN group_permissions gp ON gp.group_id = ug.group_id
                    INNER JOIN permissions p ON p.id = gp.permission_id
                    WHERE ug.user_id = $1 AND p.codename = $2
            ) AS granted
        "#;

        #[derive(Debug, FromQueryResult)]
        struct GrantedRow {
            granted: bool,
        }

        let row = GrantedRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [user_id.into(), codename.into()],
        ))
        .one(&self.db)
        .await
        .context("check permission")?;

        Ok(row.map(|r| r.granted).unwrap_or(false))
    }
}
