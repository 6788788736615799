//! # 共享字段类型
//!
//! JSON 列类型与设置类型枚举，关系型存储以 JSON 文本落库，文档型存储为原生数组。

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// 字符串列表（用户角色、菜单授权角色）
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

impl StringList {
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|item| item == value)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for StringList {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

/// 设置值：布尔、整数、字符串或字符串列表
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
}

/// 下拉选项
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// select / multiSelect 设置的可选项
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct SelectOptions(pub Vec<SelectOption>);

/// 设置类型
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum SettingType {
    #[sea_orm(string_value = "boolean")]
    #[serde(rename = "boolean")]
    Boolean,
    #[default]
    #[sea_orm(string_value = "string")]
    #[serde(rename = "string")]
    Text,
    #[sea_orm(string_value = "int")]
    #[serde(rename = "int")]
    Int,
    #[sea_orm(string_value = "select")]
    #[serde(rename = "select")]
    Select,
    #[sea_orm(string_value = "multiSelect")]
    #[serde(rename = "multiSelect")]
    MultiSelect,
    #[sea_orm(string_value = "font")]
    #[serde(rename = "font")]
    Font,
    #[sea_orm(string_value = "date")]
    #[serde(rename = "date")]
    Date,
    #[sea_orm(string_value = "group")]
    #[serde(rename = "group")]
    Group,
    #[sea_orm(string_value = "section")]
    #[serde(rename = "section")]
    Section,
}

impl SettingType {
    /// 是否为需要可选项的选择类设置
    #[must_use]
    pub const fn is_select_like(self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }
}
