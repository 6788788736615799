//! 关系型存储提供者（Sea-ORM）

use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use sea_orm_migration::{MigrationName, MigratorTrait};
use std::sync::{PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::{DatabaseHandle, ProviderKind, StorageProvider, not_connected, with_timeout};
use crate::config::StorageConfig;
use crate::error::{AdminError, Result};

/// SQLite / PostgreSQL 提供者
pub struct RelationalProvider {
    config: StorageConfig,
    connection: RwLock<Option<DatabaseConnection>>,
    connect_lock: Mutex<()>,
}

impl RelationalProvider {
    #[must_use]
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            connection: RwLock::new(None),
            connect_lock: Mutex::new(()),
        }
    }

    fn connection(&self) -> Result<DatabaseConnection> {
        self.connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| not_connected(&self.config.provider))
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.config.url.clone());
        // 内存库每个连接都是独立数据库，只能保留单连接
        let max_connections = if self.config.is_memory_database() {
            1
        } else {
            self.config.max_connections
        };
        options
            .max_connections(max_connections)
            .min_connections(1)
            .connect_timeout(self.config.connect_timeout())
            .sqlx_logging(false);
        options
    }

    async fn query_string(&self, sql: &str) -> Result<String> {
        let conn = self.connection()?;
        let backend = conn.get_database_backend();
        let row = with_timeout(
            "relational query",
            self.config.operation_timeout(),
            async {
                conn.query_one(Statement::from_string(backend, sql))
                    .await
                    .map_err(|e| AdminError::from_db_err("database", e))
            },
        )
        .await?
        .ok_or_else(|| AdminError::database(format!("查询无结果: {sql}")))?;
        row.try_get_by_index::<String>(0)
            .map_err(|e| AdminError::from_db_err("database", e))
    }
}

#[async_trait]
impl StorageProvider for RelationalProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Relational
    }

    fn provider_name(&self) -> &str {
        &self.config.provider
    }

    fn get_database(&self) -> Result<DatabaseHandle> {
        self.connection().map(DatabaseHandle::Relational)
    }

    fn is_connected(&self) -> bool {
        self.connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    async fn connect(&self) -> Result<()> {
        let _guard = self.connect_lock.lock().await;
        if self.is_connected() {
            warn!(provider = %self.config.provider, "存储已连接，忽略重复连接");
            return Ok(());
        }

        self.config.ensure_database_path()?;
        info!(provider = %self.config.provider, "正在连接数据库");

        let conn = with_timeout(
            "connect",
            self.config.connect_timeout(),
            async {
                Database::connect(self.connect_options())
                    .await
                    .map_err(|e| {
                        error!(error = %e, "数据库连接失败");
                        AdminError::connectivity_with_source("数据库连接失败", true, e)
                    })
            },
        )
        .await?;

        *self
            .connection
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(conn);
        info!(provider = %self.config.provider, "数据库连接成功");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let conn = self
            .connection
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match conn {
            Some(conn) => {
                conn.close()
                    .await
                    .map_err(|e| AdminError::from_db_err("database", e))?;
                info!(provider = %self.config.provider, "数据库连接已关闭");
            }
            None => debug!("数据库未连接，无需关闭"),
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let conn = self.connection()?;
        with_timeout("ping", self.config.operation_timeout(), async {
            conn.ping().await.map_err(|e| {
                AdminError::connectivity_with_source("数据库不可达", true, e)
            })
        })
        .await
    }

    async fn get_database_name(&self) -> String {
        let Ok(conn) = self.connection() else {
            return String::new();
        };
        match conn.get_database_backend() {
            DatabaseBackend::Sqlite => self
                .config
                .sqlite_file_path()
                .map_or_else(|| ":memory:".to_string(), str::to_string),
            _ => self
                .query_string("SELECT current_database()")
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %e, "获取数据库名称失败");
                    String::new()
                }),
        }
    }

    async fn get_database_version(&self) -> String {
        let Ok(conn) = self.connection() else {
            return String::new();
        };
        let sql = match conn.get_database_backend() {
            DatabaseBackend::Sqlite => "SELECT sqlite_version()",
            DatabaseBackend::Postgres => "SHOW server_version",
            DatabaseBackend::MySql => "SELECT VERSION()",
        };
        self.query_string(sql).await.unwrap_or_else(|e| {
            warn!(error = %e, "获取数据库版本失败");
            String::new()
        })
    }

    async fn prepare_schema(&self) -> Result<Vec<String>> {
        let conn = self.connection()?;
        info!("开始运行数据库迁移...");
        migration::Migrator::up(&conn, None).await.map_err(|e| {
            error!(error = %e, "数据库迁移失败");
            AdminError::database_with_source("数据库迁移失败", e)
        })?;
        info!("数据库迁移完成");

        Ok(migration::Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_provider() -> RelationalProvider {
        RelationalProvider::new(StorageConfig {
            url: "sqlite::memory:".to_string(),
            ..StorageConfig::default()
        })
    }

    #[tokio::test]
    async fn test_connect_ping_close() {
        let provider = memory_provider();
        provider.connect().await.unwrap();
        provider.connect().await.unwrap();
        provider.ping().await.unwrap();
        assert!(!provider.get_database_version().await.is_empty());
        assert_eq!(provider.get_database_name().await, ":memory:");

        provider.close().await.unwrap();
        assert!(provider.get_database().is_err());
        provider.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_unconnected_provider_fails_soft() {
        let provider = memory_provider();
        assert!(provider.ping().await.is_err());
        assert_eq!(provider.get_database_name().await, "");
        assert_eq!(provider.get_database_version().await, "");
    }

    #[tokio::test]
    async fn test_prepare_schema_returns_migration_names() {
        let provider = memory_provider();
        provider.connect().await.unwrap();
        let steps = provider.prepare_schema().await.unwrap();
        assert_eq!(steps.len(), 7);
        assert!(steps[0].starts_with("m20250101_000001"));
        // 重复执行不报错
        provider.prepare_schema().await.unwrap();
    }
}
