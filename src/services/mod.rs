//! # 业务服务层
//!
//! 每个实体一个服务，包装通用仓储并提供实体相关的查询与编排。
//! 通用的增删改查由 `EntityService<T>` 提供，实体服务通过 `Deref` 复用。

mod application_info;
pub mod avatar;
mod base;
mod menu;
mod migration;
mod permission;
mod role;
mod setting;
mod user;

pub use application_info::ApplicationInfoService;
pub use base::EntityService;
pub use menu::MenuService;
pub use migration::MigrationService;
pub use permission::PermissionService;
pub use role::RoleService;
pub use setting::SettingService;
pub use user::UserService;

use std::sync::Arc;

/// 全部服务的集合
#[derive(Clone)]
pub struct Services {
    pub users: Arc<UserService>,
    pub roles: Arc<RoleService>,
    pub permissions: Arc<PermissionService>,
    pub menus: Arc<MenuService>,
    pub settings: Arc<SettingService>,
    pub migrations: Arc<MigrationService>,
    pub application_info: Arc<ApplicationInfoService>,
}
