//! 设置载荷

use serde::{Deserialize, Serialize};

use super::{SelectOptions, SettingType, SettingValue};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub setting_type: SettingType,
    #[serde(default)]
    pub value: Option<SettingValue>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub sorter: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Option<SelectOptions>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// 部分更新设置；`value` / `group` / `section` 为 `Some(None)` 时清空
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setting_type: Option<SettingType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub value: Option<Option<SettingValue>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub group: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub section: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorter: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<SelectOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}
