//! # 通用仓储
//!
//! `Repository<T>` 定义按实体参数化的增删改查接口，关系型实现基于 Sea-ORM，
//! 文档型实现基于 MongoDB。列表统一按 `created_at`、`id` 升序排列。

mod document;
mod factory;
mod filter;
mod patch;
mod relational;

pub use document::MongoRepository;
pub use factory::RepositoryFactory;
pub use filter::{Filter, FilterValue};
pub use patch::{apply_patch, build_record, new_id, next_timestamp, now};
pub use relational::SeaOrmRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

/// 可持久化的实体记录
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// 创建载荷
    type Create: Serialize + Send + Sync + 'static;
    /// 部分更新载荷，未设置的字段不参与序列化
    type Update: Serialize + Send + Sync + 'static;

    /// 表名 / 集合名
    const RESOURCE: &'static str;

    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;

    /// 构造绑定到关系型连接的仓储
    fn relational_repository(
        conn: DatabaseConnection,
        timeout: Duration,
    ) -> Arc<dyn Repository<Self>>;
}

/// 通用仓储接口
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// 表名 / 集合名
    fn collection(&self) -> &'static str {
        T::RESOURCE
    }

    async fn insert_one(&self, data: T::Create) -> Result<T>;

    /// 全部成功或全部失败
    async fn insert_many(&self, data: Vec<T::Create>) -> Result<Vec<T>>;

    async fn find_one(&self, filter: &Filter) -> Result<Option<T>>;

    async fn find_many(&self, filter: &Filter) -> Result<Vec<T>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;

    async fn list(&self, skip: u64, limit: u64, filter: &Filter) -> Result<Vec<T>>;

    /// 没有匹配记录时返回 `None`
    async fn update_one(&self, filter: &Filter, data: T::Update) -> Result<Option<T>>;

    /// 至少更新一条记录时返回 `true`
    async fn update_many(&self, filter: &Filter, data: T::Update) -> Result<bool>;

    async fn delete_one(&self, id: &str) -> Result<bool>;

    async fn delete_many(&self, filter: &Filter) -> Result<bool>;

    async fn count(&self, filter: &Filter) -> Result<u64>;
}
