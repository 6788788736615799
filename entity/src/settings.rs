//! # 系统设置实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::{SelectOptions, SettingType, SettingValue};

/// 设置实体，`(name, group, section)` 唯一
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub setting_type: SettingType,
    #[sea_orm(column_type = "Json", nullable)]
    pub value: Option<SettingValue>,
    pub group: Option<String>,
    pub section: Option<String>,
    pub public: bool,
    pub hidden: bool,
    pub sorter: Option<i32>,
    pub description: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub options: Option<SelectOptions>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
