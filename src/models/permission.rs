//! 权限载荷

use serde::{Deserialize, Serialize};

/// 创建权限，操作标志默认全部关闭
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub function_id: String,
    pub role_id: String,
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub change: bool,
    #[serde(default)]
    pub delete: bool,
    #[serde(default)]
    pub administer: bool,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl Default for CreatePermission {
    fn default() -> Self {
        Self {
            id: None,
            function_id: String::new(),
            role_id: String::new(),
            create: false,
            read: false,
            change: false,
            delete: false,
            administer: false,
            is_active: true,
            created_by: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePermission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}
