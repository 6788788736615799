//! # 存储配置

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::{AdminError, Result};

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// 存储提供者：sqlite / postgres / mongodb
    pub provider: String,
    /// 连接URL
    pub url: String,
    /// 数据库名，文档型存储必需（可从URL推断）
    pub database_name: Option<String>,
    /// 最大连接数
    pub max_connections: u32,
    /// 连接超时时间（秒）
    pub connect_timeout: u64,
    /// 单次存储操作超时（毫秒）
    pub operation_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: "sqlite".to_string(),
            url: "sqlite://./data/admin.db?mode=rwc".to_string(),
            database_name: None,
            max_connections: 10,
            connect_timeout: 30,
            operation_timeout_ms: 5000,
        }
    }
}

impl StorageConfig {
    /// 确保数据库路径存在（仅对SQLite文件数据库）
    pub fn ensure_database_path(&self) -> Result<()> {
        let Some(path_str) = self.sqlite_file_path() else {
            return Ok(());
        };
        let db_path = Path::new(path_str);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AdminError::config_with_source(
                        format!("无法创建数据库目录: {}", parent.display()),
                        e,
                    )
                })?;
                info!(path = %parent.display(), "创建数据库目录");
            }
        }

        if !db_path.exists() {
            info!(path = %db_path.display(), "数据库文件将在首次连接时创建");
        }

        Ok(())
    }

    /// SQLite 文件路径（去掉 scheme 与查询参数）
    #[must_use]
    pub fn sqlite_file_path(&self) -> Option<&str> {
        if !self.is_sqlite() || self.is_memory_database() {
            return None;
        }
        let rest = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))?;
        Some(rest.split('?').next().unwrap_or(rest))
    }

    /// 检查是否为内存数据库
    #[must_use]
    pub fn is_memory_database(&self) -> bool {
        self.url.contains(":memory:")
    }

    /// 检查是否为SQLite数据库
    #[must_use]
    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }

    #[must_use]
    pub const fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path_strips_query() {
        let config = StorageConfig {
            url: "sqlite://./data/admin.db?mode=rwc".to_string(),
            ..StorageConfig::default()
        };
        assert_eq!(config.sqlite_file_path(), Some("./data/admin.db"));
    }

    #[test]
    fn test_memory_database_has_no_file() {
        let config = StorageConfig {
            url: "sqlite::memory:".to_string(),
            ..StorageConfig::default()
        };
        assert!(config.is_memory_database());
        assert_eq!(config.sqlite_file_path(), None);
        assert!(config.ensure_database_path().is_ok());
    }

    #[test]
    fn test_ensure_database_path_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("admin.db");
        let config = StorageConfig {
            url: format!("sqlite://{}?mode=rwc", db.display()),
            ..StorageConfig::default()
        };
        config.ensure_database_path().unwrap();
        assert!(dir.path().join("nested").exists());
    }
}
