//! # 应用信息服务
//!
//! 单行记录，启动时写入；读取走进程内缓存，首次读取由互斥锁保证只访问一次存储。

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::MigrationService;
use crate::error::Result;
use crate::models::{ApplicationInfo, CreateApplicationInfo};
use crate::repository::{Filter, Repository};
use crate::storage::StorageProvider;

pub struct ApplicationInfoService {
    repository: Arc<dyn Repository<ApplicationInfo>>,
    provider: Arc<dyn StorageProvider>,
    migrations: Arc<MigrationService>,
    cache_provider: String,
    cached: RwLock<Option<Arc<ApplicationInfo>>>,
    load_lock: Mutex<()>,
}

impl ApplicationInfoService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn Repository<ApplicationInfo>>,
        provider: Arc<dyn StorageProvider>,
        migrations: Arc<MigrationService>,
        cache_provider: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            provider,
            migrations,
            cache_provider: cache_provider.into(),
            cached: RwLock::new(None),
            load_lock: Mutex::new(()),
        }
    }

    /// 写入当前运行环境快照并刷新缓存
    pub async fn set_application_info(&self) -> Result<Arc<ApplicationInfo>> {
        let snapshot = self.snapshot().await?;

        let existing = self.repository.find_one(&Filter::new()).await?;
        let info = match existing {
            Some(current) => {
                let updated = self
                    .repository
                    .update_one(&Filter::by_id(&current.id), snapshot.clone().into())
                    .await?;
                match updated {
                    Some(info) => info,
                    None => self.repository.insert_one(snapshot).await?,
                }
            }
            None => self.repository.insert_one(snapshot).await?,
        };

        info!(
            app_version = %info.app_version,
            database_provider = %info.database_provider,
            database_name = %info.database_name,
            migration = info.database_migration.as_deref().unwrap_or("-"),
            "应用信息已更新"
        );

        let info = Arc::new(info);
        self.store_cache(Arc::clone(&info));
        Ok(info)
    }

    /// 读取应用信息，首次调用后直接返回缓存
    pub async fn get_application_info(&self) -> Result<Arc<ApplicationInfo>> {
        if let Some(info) = self.cached() {
            return Ok(info);
        }

        let _guard = self.load_lock.lock().await;
        if let Some(info) = self.cached() {
            return Ok(info);
        }

        match self.repository.find_one(&Filter::new()).await? {
            Some(info) => {
                debug!("应用信息从存储加载");
                let info = Arc::new(info);
                self.store_cache(Arc::clone(&info));
                Ok(info)
            }
            None => self.set_application_info().await,
        }
    }

    /// 清除缓存，下一次读取重新访问存储
    pub fn invalidate(&self) {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn cached(&self) -> Option<Arc<ApplicationInfo>> {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_cache(&self, info: Arc<ApplicationInfo>) {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(info);
    }

    async fn snapshot(&self) -> Result<CreateApplicationInfo> {
        Ok(CreateApplicationInfo {
            id: None,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            database_provider: self.provider.provider_name().to_string(),
            database_name: self.provider.get_database_name().await,
            database_version: self.provider.get_database_version().await,
            database_migration: self.migrations.latest().await?,
            cache_provider: self.cache_provider.clone(),
            created_by: None,
        })
    }
}
