//! 通用实体服务

use std::sync::Arc;

use crate::error::Result;
use crate::repository::{Filter, Record, Repository};

/// 包装单个仓储的通用增删改查
pub struct EntityService<T: Record> {
    repository: Arc<dyn Repository<T>>,
}

impl<T: Record> Clone for EntityService<T> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<T: Record> EntityService<T> {
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<T>>) -> Self {
        Self { repository }
    }

    #[must_use]
    pub fn repository(&self) -> &Arc<dyn Repository<T>> {
        &self.repository
    }

    pub async fn create(&self, data: T::Create) -> Result<T> {
        self.repository.insert_one(data).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>> {
        self.repository.find_by_id(id).await
    }

    pub async fn list(&self, skip: u64, limit: u64, filter: &Filter) -> Result<Vec<T>> {
        self.repository.list(skip, limit, filter).await
    }

    pub async fn update(&self, id: &str, data: T::Update) -> Result<Option<T>> {
        self.repository.update_one(&Filter::by_id(id), data).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.repository.delete_one(id).await
    }

    pub async fn count(&self, filter: &Filter) -> Result<u64> {
        self.repository.count(filter).await
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<T>> {
        self.repository.find_one(filter).await
    }

    pub async fn find_many(&self, filter: &Filter) -> Result<Vec<T>> {
        self.repository.find_many(filter).await
    }

    /// 唯一字段是否已被其他记录占用
    pub async fn is_taken(&self, filter: &Filter, except_id: Option<&str>) -> Result<bool> {
        Ok(self
            .repository
            .find_one(filter)
            .await?
            .is_some_and(|existing| Some(existing.id()) != except_id))
    }
}
