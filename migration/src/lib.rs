pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users_table;
mod m20250101_000002_create_roles_table;
mod m20250101_000003_create_permissions_table;
mod m20250101_000004_create_menus_table;
mod m20250101_000005_create_settings_table;
mod m20250101_000006_create_application_info_table;
mod m20250101_000007_create_migration_dbs_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users_table::Migration),
            Box::new(m20250101_000002_create_roles_table::Migration),
            Box::new(m20250101_000003_create_permissions_table::Migration),
            Box::new(m20250101_000004_create_menus_table::Migration),
            Box::new(m20250101_000005_create_settings_table::Migration),
            Box::new(m20250101_000006_create_application_info_table::Migration),
            Box::new(m20250101_000007_create_migration_dbs_table::Migration),
        ]
    }
}
