//! # Entity 模块
//!
//! 包含所有 Sea-ORM 实体定义。
//!
//! 实体同时实现 `Serialize`/`Deserialize`，文档型存储直接以同一结构读写，
//! 关系型存储通过 Sea-ORM 映射到表。

pub mod application_info;
pub mod common;
pub mod menus;
pub mod migration_dbs;
pub mod permissions;
pub mod roles;
pub mod settings;
pub mod users;

pub use application_info::Entity as ApplicationInfo;
pub use menus::Entity as Menus;
pub use migration_dbs::Entity as MigrationDbs;
pub use permissions::Entity as Permissions;
pub use roles::Entity as Roles;
pub use settings::Entity as Settings;
pub use users::Entity as Users;

pub use common::{SelectOption, SelectOptions, SettingType, SettingValue, StringList};

#[cfg(test)]
mod tests;
