use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Default user listing orders by date_joined descending.
        manager
            .create_index(
                Index::create()
                    .table(Users::Table)
                    .col(Users::DateJoined)
                    .name("idx_users_date_joined")
                    .to_owned(),
            )
            .await?;
        // Reverse-relation lookups enter the join tables by the second key.
        manager
            .create_index(
                Index::create()
                    .table(UserGroups::Table)
                    .col(UserGroups::GroupId)
                    .name("idx_user_groups_group_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(UserPermissions::Table)
                    .col(UserPermissions::PermissionId)
                    .name("idx_user_permissions_permission_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(GroupPermissions::Table)
                    .col(GroupPermissions::PermissionId)
                    .name("idx_group_permissions_permission_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_group_permissions_permission_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_permissions_permission_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_groups_group_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_users_date_joined").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    DateJoined,
}

#[derive(Iden)]
enum UserGroups {
    Table,
    GroupId,
}

#[derive(Iden)]
enum UserPermissions {
    Table,
    PermissionId,
}

#[derive(Iden)]
enum GroupPermissions {
    Table,
    PermissionId,
}
