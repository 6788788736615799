//! # 用户实体定义
//!
//! 管理后台用户表的 Sea-ORM 实体模型

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::StringList;

/// 用户实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    /// bcrypt 哈希，永不存明文
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub language: String,
    pub is_active: bool,
    pub last_login: Option<DateTimeUtc>,
    pub last_ip_address: Option<String>,
    pub password_changed_at: Option<DateTimeUtc>,
    /// 角色名称列表
    #[sea_orm(column_type = "Json")]
    pub roles: StringList,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
