//! 应用信息载荷

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateApplicationInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub app_version: String,
    pub database_provider: String,
    pub database_name: String,
    pub database_version: String,
    #[serde(default)]
    pub database_migration: Option<String>,
    pub cache_provider: String,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateApplicationInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_migration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl From<CreateApplicationInfo> for UpdateApplicationInfo {
    fn from(info: CreateApplicationInfo) -> Self {
        Self {
            app_version: Some(info.app_version),
            database_provider: Some(info.database_provider),
            database_name: Some(info.database_name),
            database_version: Some(info.database_version),
            database_migration: info.database_migration,
            cache_provider: Some(info.cache_provider),
            updated_by: info.created_by,
        }
    }
}
