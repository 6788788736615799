//! 用户载荷

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "en".to_string()
}

/// 创建用户；`password` 在入库前由服务层替换为哈希
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_ip_address: Option<String>,
    #[serde(default)]
    pub password_changed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl Default for CreateUser {
    fn default() -> Self {
        Self {
            id: None,
            email: String::new(),
            username: String::new(),
            password: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            avatar: None,
            language: default_language(),
            is_active: true,
            last_login: None,
            last_ip_address: None,
            password_changed_at: None,
            roles: Vec::new(),
            created_by: None,
        }
    }
}

/// 部分更新用户
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_changed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}
