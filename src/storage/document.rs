//! 文档型存储提供者（MongoDB）

use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use std::sync::{PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{DatabaseHandle, ProviderKind, StorageProvider, not_connected, with_timeout};
use crate::config::StorageConfig;
use crate::error::{AdminError, Result};

/// 未配置数据库名且 URL 未指定时使用
const DEFAULT_DATABASE: &str = "admin_hub";

/// 文档型结构步骤标识，写入迁移记录
pub const DOCUMENT_INDEXES_STEP: &str = "m20250101_000001_document_indexes";

/// 各集合的唯一索引
const UNIQUE_INDEXES: &[(&str, &[&str])] = &[
    ("users", &["email"]),
    ("users", &["username"]),
    ("roles", &["name"]),
    ("permissions", &["function_id", "role_id"]),
    ("menus", &["path"]),
    ("settings", &["name", "group", "section"]),
    ("migration_dbs", &["file_name"]),
];

/// MongoDB 提供者
pub struct DocumentProvider {
    config: StorageConfig,
    client: RwLock<Option<(Client, Database)>>,
    connect_lock: Mutex<()>,
}

impl DocumentProvider {
    #[must_use]
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            connect_lock: Mutex::new(()),
        }
    }

    fn database(&self) -> Result<Database> {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, db)| db.clone())
            .ok_or_else(|| not_connected(&self.config.provider))
    }

    async fn run_command(&self, command: Document) -> Result<Document> {
        let db = self.database()?;
        with_timeout("mongodb command", self.config.operation_timeout(), async {
            db.run_command(command)
                .await
                .map_err(|e| AdminError::from_mongo_err("database", e))
        })
        .await
    }
}

#[async_trait]
impl StorageProvider for DocumentProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Document
    }

    fn provider_name(&self) -> &str {
        &self.config.provider
    }

    fn get_database(&self) -> Result<DatabaseHandle> {
        self.database().map(DatabaseHandle::Document)
    }

    fn is_connected(&self) -> bool {
        self.client
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

        let mut options = with_timeout("connect", self.config.connect_timeout(), async {
            ClientOptions::parse(&self.config.url)
                .await
                .map_err(|e| AdminError::config_with_source("MongoDB 连接串无效", e))
        })
        .await?;
        options.max_pool_size = Some(self.config.max_connections);
        options.connect_timeout = Some(self.config.connect_timeout());
        options.server_selection_timeout = Some(self.config.connect_timeout());

        let client = Client::with_options(options)
            .map_err(|e| AdminError::config_with_source("MongoDB 客户端创建失败", e))?;
        let database_name = self
            .config
            .database_name
            .clone()
            .or_else(|| client.default_database().map(|db| db.name().to_string()))
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let database = client.database(&database_name);

        // 驱动延迟建连，这里主动探测一次
        with_timeout("connect", self.config.connect_timeout(), async {
            database
                .run_command(doc! { "ping": 1 })
                .await
                .map_err(|e| AdminError::connectivity_with_source("MongoDB 不可达", true, e))
        })
        .await?;

        *self.client.write().unwrap_or_else(PoisonError::into_inner) = Some((client, database));
        info!(provider = %self.config.provider, database = %database_name, "MongoDB 连接成功");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let client = self
            .client
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match client {
            Some((client, _)) => {
                client.shutdown().await;
                info!("MongoDB 连接已关闭");
            }
            None => debug!("MongoDB 未连接，无需关闭"),
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.run_command(doc! { "ping": 1 }).await.map(|_| ())
    }

    async fn get_database_name(&self) -> String {
        self.database()
            .map(|db| db.name().to_string())
            .unwrap_or_default()
    }

    async fn get_database_version(&self) -> String {
        match self.run_command(doc! { "buildInfo": 1 }).await {
            Ok(info) => info.get_str("version").unwrap_or_default().to_string(),
            Err(e) => {
                warn!(error = %e, "获取 MongoDB 版本失败");
                String::new()
            }
        }
    }

    async fn prepare_schema(&self) -> Result<Vec<String>> {
        let db = self.database()?;
        for (collection, fields) in UNIQUE_INDEXES {
            let mut keys = Document::new();
            for field in *fields {
                keys.insert(*field, 1);
            }
            let index = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build();
            with_timeout("create_index", self.config.operation_timeout(), async {
                db.collection::<Document>(collection)
                    .create_index(index)
                    .await
                    .map_err(|e| AdminError::from_mongo_err(collection, e))
            })
            .await?;
            debug!(collection = %collection, fields = ?fields, "唯一索引已就绪");
        }
        info!("MongoDB 索引创建完成");
        Ok(vec![DOCUMENT_INDEXES_STEP.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconnected_document_provider() {
        let provider = DocumentProvider::new(StorageConfig {
            provider: "mongodb".to_string(),
            url: "mongodb://127.0.0.1:27017".to_string(),
            ..StorageConfig::default()
        });
        assert_eq!(provider.kind(), ProviderKind::Document);
        assert!(matches!(provider.get_database(), Err(AdminError::Config { .. })));
        assert_eq!(provider.get_database_name().await, "");
        assert_eq!(provider.get_database_version().await, "");
        provider.close().await.unwrap();
    }

    #[test]
    fn test_unique_indexes_cover_constrained_collections() {
        let collections: Vec<&str> = UNIQUE_INDEXES.iter().map(|(c, _)| *c).collect();
        for name in ["users", "roles", "permissions", "menus", "settings", "migration_dbs"] {
            assert!(collections.contains(&name), "missing index for {name}");
        }
    }
}
