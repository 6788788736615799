//! MongoDB 仓储实现

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc, from_document, to_document};
use mongodb::{Collection, Database};
use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::{Filter, Record, Repository, apply_patch, build_record};
use crate::error::{AdminError, Result};
use crate::storage::with_timeout;

/// 时间戳统一为定长格式，保证字符串排序与时间顺序一致
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// 基于 MongoDB 集合的仓储
pub struct MongoRepository<T: Record> {
    collection: Collection<Document>,
    timeout: Duration,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> MongoRepository<T> {
    #[must_use]
    pub fn new(db: &Database, timeout: Duration) -> Self {
        Self {
            collection: db.collection::<Document>(T::RESOURCE),
            timeout,
            _record: PhantomData,
        }
    }

    fn sort() -> Document {
        doc! { "created_at": 1, "_id": 1 }
    }

    fn store_error(
        &self,
        operation: &str,
        filter: &Filter,
        err: mongodb::error::Error,
    ) -> AdminError {
        error!(
            collection = T::RESOURCE,
            operation,
            filter = %filter,
            error = %err,
            "仓储操作失败"
        );
        AdminError::from_mongo_err(T::RESOURCE, err)
    }

    async fn timed<R, F>(&self, operation: &str, future: F) -> Result<R>
    where
        F: Future<Output = Result<R>>,
    {
        let label = format!("{operation} {}", T::RESOURCE);
        with_timeout(&label, self.timeout, future).await
    }

    /// 记录 -> 文档：`id` 改写为 `_id`
    fn to_bson(record: &T) -> Result<Document> {
        let mut document = to_document(record)?;
        if let Some(id) = document.remove("id") {
            document.insert("_id", id);
        }
        document.insert(
            "created_at",
            record.created_at().format(TIMESTAMP_FORMAT).to_string(),
        );
        document.insert(
            "updated_at",
            record.updated_at().format(TIMESTAMP_FORMAT).to_string(),
        );
        Ok(document)
    }

    /// 文档 -> 记录：`_id` 改写为 `id`
    fn from_bson(mut document: Document) -> Result<T> {
        if let Some(id) = document.remove("_id") {
            let id = match id {
                Bson::ObjectId(oid) => Bson::String(oid.to_hex()),
                other => other,
            };
            document.insert("id", id);
        }
        Ok(from_document(document)?)
    }

    async fn fetch(
        &self,
        operation: &str,
        filter: &Filter,
        skip: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<T>> {
        let documents: Vec<Document> = self
            .timed(operation, async {
                let mut action = self.collection.find(filter.to_document()).sort(Self::sort());
                if let Some(skip) = skip {
                    action = action.skip(skip);
                }
                if let Some(limit) = limit {
                    action = action.limit(i64::try_from(limit).unwrap_or(i64::MAX));
                }
                let cursor = action
                    .await
                    .map_err(|e| self.store_error(operation, filter, e))?;
                cursor
                    .try_collect()
                    .await
                    .map_err(|e| self.store_error(operation, filter, e))
            })
            .await?;
        documents.into_iter().map(Self::from_bson).collect()
    }

    async fn replace(&self, current: &T, patch: &T::Update) -> Result<T> {
        let merged = apply_patch(current, patch)?;
        let document = Self::to_bson(&merged)?;
        let filter = Filter::by_id(current.id());
        self.timed("replace_one", async {
            self.collection
                .replace_one(doc! { "_id": current.id() }, document)
                .await
                .map_err(|e| self.store_error("replace_one", &filter, e))
        })
        .await?;
        Ok(merged)
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MongoRepository<T> {
    async fn insert_one(&self, data: T::Create) -> Result<T> {
        let record: T = build_record(&data)?;
        let document = Self::to_bson(&record)?;
        let filter = Filter::by_id(record.id());
        self.timed("insert_one", async {
            self.collection
                .insert_one(document)
                .await
                .map_err(|e| self.store_error("insert_one", &filter, e))
        })
        .await?;
        info!(collection = T::RESOURCE, id = %record.id(), "记录已创建");
        Ok(record)
    }

    async fn insert_many(&self, data: Vec<T::Create>) -> Result<Vec<T>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        let records = data
            .iter()
            .map(build_record::<T>)
            .collect::<Result<Vec<_>>>()?;
        let documents = records
            .iter()
            .map(Self::to_bson)
            .collect::<Result<Vec<_>>>()?;
        let batch = records
            .iter()
            .map(|record| record.id().to_string())
            .zip(documents)
            .collect();

        let (written, failure) = insert_in_order(batch, |id, document| async move {
            let filter = Filter::by_id(&id);
            self.timed("insert_many", async {
                self.collection
                    .insert_one(document)
                    .await
                    .map(|_| ())
                    .map_err(|e| self.store_error("insert_many", &filter, e))
            })
            .await
        })
        .await;

        if let Some(err) = failure {
            // 只回滚本批次实际写入的记录，已存在的同 id 记录保持不动
            if !written.is_empty() {
                let filter = Filter::new();
                let compensation = self
                    .timed("insert_many rollback", async {
                        self.collection
                            .delete_many(doc! { "_id": { "$in": written.clone() } })
                            .await
                            .map_err(|e| self.store_error("insert_many rollback", &filter, e))
                    })
                    .await;
                if let Err(e) = compensation {
                    error!(collection = T::RESOURCE, error = %e, "批量写入补偿删除失败");
                }
            }
            return Err(err);
        }

        info!(collection = T::RESOURCE, count = records.len(), "批量创建完成");
        Ok(records)
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<T>> {
        let found = self
            .timed("find_one", async {
                self.collection
                    .find_one(filter.to_document())
                    .sort(Self::sort())
                    .await
                    .map_err(|e| self.store_error("find_one", filter, e))
            })
            .await?;
        match found {
            Some(document) => Self::from_bson(document).map(Some),
            None => {
                debug!(collection = T::RESOURCE, filter = %filter, "未找到记录");
                Ok(None)
            }
        }
    }

    async fn find_many(&self, filter: &Filter) -> Result<Vec<T>> {
        let found = self.fetch("find_many", filter, None, None).await?;
        debug!(collection = T::RESOURCE, filter = %filter, count = found.len(), "查询完成");
        Ok(found)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        self.find_one(&Filter::by_id(id)).await
    }

    async fn list(&self, skip: u64, limit: u64, filter: &Filter) -> Result<Vec<T>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let found = self.fetch("list", filter, Some(skip), Some(limit)).await?;
        debug!(
            collection = T::RESOURCE,
            filter = %filter,
            skip,
            limit,
            count = found.len(),
            "分页查询完成"
        );
        Ok(found)
    }

    async fn update_one(&self, filter: &Filter, data: T::Update) -> Result<Option<T>> {
        let Some(current) = self.find_one(filter).await? else {
            warn!(collection = T::RESOURCE, filter = %filter, "更新目标不存在");
            return Ok(None);
        };
        let updated = self.replace(&current, &data).await?;
        info!(collection = T::RESOURCE, id = %updated.id(), "记录已更新");
        Ok(Some(updated))
    }

    async fn update_many(&self, filter: &Filter, data: T::Update) -> Result<bool> {
        let targets = self.find_many(filter).await?;
        if targets.is_empty() {
            warn!(collection = T::RESOURCE, filter = %filter, "批量更新无匹配记录");
            return Ok(false);
        }
        for current in &targets {
            self.replace(current, &data).await?;
        }
        info!(collection = T::RESOURCE, count = targets.len(), "批量更新完成");
        Ok(true)
    }

    async fn delete_one(&self, id: &str) -> Result<bool> {
        let filter = Filter::by_id(id);
        let result = self
            .timed("delete_one", async {
                self.collection
                    .delete_one(doc! { "_id": id })
                    .await
                    .map_err(|e| self.store_error("delete_one", &filter, e))
            })
            .await?;
        let deleted = result.deleted_count > 0;
        if deleted {
            info!(collection = T::RESOURCE, id, "记录已删除");
        } else {
            warn!(collection = T::RESOURCE, id, "删除目标不存在");
        }
        Ok(deleted)
    }

    async fn delete_many(&self, filter: &Filter) -> Result<bool> {
        let result = self
            .timed("delete_many", async {
                self.collection
                    .delete_many(filter.to_document())
                    .await
                    .map_err(|e| self.store_error("delete_many", filter, e))
            })
            .await?;
        info!(
            collection = T::RESOURCE,
            filter = %filter,
            count = result.deleted_count,
            "批量删除完成"
        );
        Ok(result.deleted_count > 0)
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        self.timed("count", async {
            self.collection
                .count_documents(filter.to_document())
                .await
                .map_err(|e| self.store_error("count", filter, e))
        })
        .await
    }
}

/// 按顺序逐条写入，返回已写入的 id 与首个错误
async fn insert_in_order<D, F, Fut>(
    batch: Vec<(String, D)>,
    mut insert: F,
) -> (Vec<String>, Option<AdminError>)
where
    F: FnMut(String, D) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut written = Vec::with_capacity(batch.len());
    for (id, document) in batch {
        if let Err(err) = insert(id.clone(), document).await {
            return (written, Some(err));
        }
        written.push(id);
    }
    (written, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateRole;
    use entity::roles;

    #[test]
    fn test_bson_conversion_renames_id() {
        let role: roles::Model = build_record::<roles::Model>(&CreateRole {
            name: "admin".to_string(),
            ..CreateRole::default()
        })
        .unwrap();

        let document = MongoRepository::<roles::Model>::to_bson(&role).unwrap();
        assert_eq!(document.get_str("_id").unwrap(), role.id);
        assert!(!document.contains_key("id"));

        let back = MongoRepository::<roles::Model>::from_bson(document).unwrap();
        assert_eq!(back, role);
    }

    #[test]
    fn test_timestamps_are_fixed_width() {
        let role: roles::Model = build_record::<roles::Model>(&CreateRole {
            name: "ops".to_string(),
            ..CreateRole::default()
        })
        .unwrap();
        let document = MongoRepository::<roles::Model>::to_bson(&role).unwrap();
        let created = document.get_str("created_at").unwrap();
        assert_eq!(created.len(), "2025-01-01T00:00:00.000000Z".len());
    }

    fn batch(ids: &[&str]) -> Vec<(String, ())> {
        ids.iter().map(|id| ((*id).to_string(), ())).collect()
    }

    async fn insert_unless_taken(taken: &'static [&'static str], id: String) -> Result<()> {
        if taken.contains(&id.as_str()) {
            Err(AdminError::conflict("roles", "unique", id))
        } else {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_insert_in_order_skips_existing_id_on_rollback() {
        let (written, failure) =
            insert_in_order(batch(&["x", "y"]), |id, ()| insert_unless_taken(&["x"], id)).await;
        assert!(written.is_empty());
        assert!(failure.is_some_and(|e| e.is_conflict()));
    }

    #[tokio::test]
    async fn test_insert_in_order_reports_prefix_written_before_failure() {
        let (written, failure) = insert_in_order(batch(&["a", "x", "b"]), |id, ()| {
            insert_unless_taken(&["x"], id)
        })
        .await;
        assert_eq!(written, vec!["a".to_string()]);
        assert!(failure.is_some());

        let (written, failure) =
            insert_in_order(batch(&["a", "b"]), |id, ()| insert_unless_taken(&[], id)).await;
        assert_eq!(written, vec!["a".to_string(), "b".to_string()]);
        assert!(failure.is_none());
    }
}
