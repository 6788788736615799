//! 仓储工厂
//!
//! 按实体类型构造并缓存绑定到当前提供者的仓储，缓存在进程生命周期内有效。

use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::{MongoRepository, Record, Repository};
use crate::error::Result;
use crate::storage::{DatabaseHandle, StorageProvider};

/// 仓储工厂
pub struct RepositoryFactory {
    provider: Arc<dyn StorageProvider>,
    timeout: Duration,
    /// `TypeId` -> `Arc<dyn Repository<T>>`
    cache: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl RepositoryFactory {
    #[must_use]
    pub fn new(provider: Arc<dyn StorageProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            cache: DashMap::new(),
        }
    }

    /// 获取实体仓储；提供者未连接时返回配置错误
    pub fn get_repository<T: Record>(&self) -> Result<Arc<dyn Repository<T>>> {
        let type_id = TypeId::of::<T>();
        if let Some(repository) = self
            .cache
            .get(&type_id)
            .and_then(|entry| entry.value().downcast_ref::<Arc<dyn Repository<T>>>().cloned())
        {
            return Ok(repository);
        }

        let handle = self.provider.get_database()?;
        let entry = self.cache.entry(type_id).or_insert_with(|| {
            let repository: Arc<dyn Repository<T>> = match handle {
                DatabaseHandle::Relational(conn) => T::relational_repository(conn, self.timeout),
                DatabaseHandle::Document(db) => {
                    Arc::new(MongoRepository::<T>::new(&db, self.timeout))
                }
            };
            debug!(collection = T::RESOURCE, provider = %self.provider.kind(), "创建仓储");
            let stored: Arc<dyn Any + Send + Sync> = Arc::new(repository);
            stored
        });

        entry
            .value()
            .downcast_ref::<Arc<dyn Repository<T>>>()
            .cloned()
            .ok_or_else(|| crate::internal_error!("仓储缓存类型不匹配: {}", T::RESOURCE))
    }

    /// 已缓存的仓储数量
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}
