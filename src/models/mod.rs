//! # 领域模型
//!
//! 实体记录别名、创建/更新载荷，以及把实体接入通用仓储的 `Record` 实现。

mod application_info;
mod menu;
mod migration_info;
mod permission;
mod role;
mod setting;
mod user;

pub use application_info::{CreateApplicationInfo, UpdateApplicationInfo};
pub use menu::{CreateMenu, MenuNode, UpdateMenu};
pub use migration_info::{CreateMigrationInfo, UpdateMigrationInfo};
pub use permission::{CreatePermission, UpdatePermission};
pub use role::{CreateRole, UpdateRole};
pub use setting::{CreateSetting, UpdateSetting};
pub use user::{CreateUser, UpdateUser};

pub use entity::common::{SelectOption, SelectOptions, SettingType, SettingValue, StringList};

pub type User = entity::users::Model;
pub type Role = entity::roles::Model;
pub type Permission = entity::permissions::Model;
pub type Menu = entity::menus::Model;
pub type Setting = entity::settings::Model;
pub type ApplicationInfo = entity::application_info::Model;
pub type MigrationInfo = entity::migration_dbs::Model;

/// 为实体模型实现 `Record`
macro_rules! impl_record {
    ($model:ty, $entity:ty, $create:ty, $update:ty, $resource:literal) => {
        impl $crate::repository::Record for $model {
            type Create = $create;
            type Update = $update;

            const RESOURCE: &'static str = $resource;

            fn id(&self) -> &str {
                &self.id
            }

            fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> chrono::DateTime<chrono::Utc> {
                self.updated_at
            }

            fn relational_repository(
                conn: sea_orm::DatabaseConnection,
                timeout: std::time::Duration,
            ) -> std::sync::Arc<dyn $crate::repository::Repository<Self>> {
                std::sync::Arc::new($crate::repository::SeaOrmRepository::<$entity>::new(
                    conn, timeout,
                ))
            }
        }
    };
}

impl_record!(User, entity::users::Entity, CreateUser, UpdateUser, "users");
impl_record!(Role, entity::roles::Entity, CreateRole, UpdateRole, "roles");
impl_record!(
    Permission,
    entity::permissions::Entity,
    CreatePermission,
    UpdatePermission,
    "permissions"
);
impl_record!(Menu, entity::menus::Entity, CreateMenu, UpdateMenu, "menus");
impl_record!(Setting, entity::settings::Entity, CreateSetting, UpdateSetting, "settings");
impl_record!(
    ApplicationInfo,
    entity::application_info::Entity,
    CreateApplicationInfo,
    UpdateApplicationInfo,
    "application_info"
);
impl_record!(
    MigrationInfo,
    entity::migration_dbs::Entity,
    CreateMigrationInfo,
    UpdateMigrationInfo,
    "migration_dbs"
);

pub(crate) const fn default_true() -> bool {
    true
}
