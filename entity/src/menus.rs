//! # 菜单实体定义
//!
//! 前端路由菜单，`parent_id` 形成树形结构

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::StringList;

/// 菜单实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "menus")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub path: String,
    pub parent_id: Option<String>,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub component: Option<String>,
    pub redirect: Option<String>,
    pub layout: bool,
    pub exact: Option<bool>,
    pub sort_order: Option<i32>,
    pub hide_in_menu: bool,
    pub hide_children_in_menu: bool,
    pub is_active: bool,
    /// 可访问该菜单的角色名称
    #[sea_orm(column_type = "Json")]
    pub authority: StringList,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
