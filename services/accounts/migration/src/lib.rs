use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_groups;
mod m20260801_000003_create_permissions;
mod m20260801_000004_create_user_groups;
mod m20260801_000005_create_user_permissions;
mod m20260801_000006_create_group_permissions;
mod m20260801_000007_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_groups::Migration),
            Box::new(m20260801_000003_create_permissions::Migration),
            Box::new(m20260801_000004_create_user_groups::Migration),
            Box::new(m20260801_000005_create_user_permissions::Migration),
            Box::new(m20260801_000006_create_group_permissions::Migration),
            Box::new(m20260801_000007_add_lookup_indexes::Migration),
        ]
    }
}
