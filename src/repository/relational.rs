//! Sea-ORM 仓储实现

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, Iterable, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use std::future::Future;
use std::marker::PhantomData;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::{Filter, Record, Repository, apply_patch, build_record};
use crate::error::{AdminError, Result};
use crate::storage::with_timeout;

/// 基于 Sea-ORM 实体的仓储
pub struct SeaOrmRepository<E: EntityTrait> {
    db: DatabaseConnection,
    timeout: Duration,
    _entity: PhantomData<fn() -> E>,
}

impl<E> SeaOrmRepository<E>
where
    E: EntityTrait,
    E::Model: Record + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
    #[must_use]
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self {
            db,
            timeout,
            _entity: PhantomData,
        }
    }

    fn column(name: &str) -> Result<E::Column> {
        E::Column::from_str(name).map_err(|_| {
            AdminError::internal(format!("{} 缺少列 {name}", E::Model::RESOURCE))
        })
    }

    fn store_error(&self, operation: &str, filter: &Filter, err: sea_orm::DbErr) -> AdminError {
        error!(
            collection = E::Model::RESOURCE,
            operation,
            filter = %filter,
            error = %err,
            "仓储操作失败"
        );
        AdminError::from_db_err(E::Model::RESOURCE, err)
    }

    async fn timed<T, F>(&self, operation: &str, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let label = format!("{operation} {}", E::Model::RESOURCE);
        with_timeout(&label, self.timeout, future).await
    }

    /// 所有列都标记为 Set 的 ActiveModel，用于插入
    fn full_active_model(model: &E::Model) -> E::ActiveModel {
        let mut active = <E::ActiveModel as ActiveModelTrait>::default();
        for column in E::Column::iter() {
            active.set(column, model.get(column));
        }
        active
    }

    /// 只把发生变化的列标记为 Set
    fn changed_active_model(current: &E::Model, merged: &E::Model) -> E::ActiveModel {
        let mut active = current.clone().into_active_model();
        for column in E::Column::iter() {
            let value = merged.get(column);
            if value != current.get(column) {
                active.set(column, value);
            }
        }
        active
    }

    fn ordered_select(filter: &Filter) -> Result<sea_orm::Select<E>> {
        Ok(E::find()
            .filter(filter.to_condition::<E>()?)
            .order_by_asc(Self::column("created_at")?)
            .order_by_asc(Self::column("id")?))
    }

    async fn insert_models<C: ConnectionTrait>(
        conn: &C,
        models: &[E::Model],
    ) -> std::result::Result<(), sea_orm::DbErr> {
        for model in models {
            E::insert(Self::full_active_model(model))
                .exec_without_returning(conn)
                .await?;
        }
        Ok(())
    }

    async fn update_model<C: ConnectionTrait>(
        conn: &C,
        current: &E::Model,
        patch: &<E::Model as Record>::Update,
    ) -> Result<E::Model> {
        let merged = apply_patch(current, patch)?;
        Self::changed_active_model(current, &merged)
            .update(conn)
            .await
            .map_err(|e| AdminError::from_db_err(E::Model::RESOURCE, e))
    }
}

#[async_trait]
impl<E> Repository<E::Model> for SeaOrmRepository<E>
where
    E: EntityTrait,
    E::Model: Record + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
    async fn insert_one(&self, data: <E::Model as Record>::Create) -> Result<E::Model> {
        let model: E::Model = build_record(&data)?;
        let filter = Filter::by_id(model.id());
        self.timed("insert_one", async {
            Self::insert_models(&self.db, std::slice::from_ref(&model))
                .await
                .map_err(|e| self.store_error("insert_one", &filter, e))
        })
        .await?;
        info!(collection = E::Model::RESOURCE, id = %model.id(), "记录已创建");
        Ok(model)
    }

    async fn insert_many(&self, data: Vec<<E::Model as Record>::Create>) -> Result<Vec<E::Model>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        let models = data
            .iter()
            .map(build_record::<E::Model>)
            .collect::<Result<Vec<_>>>()?;
        let filter = Filter::new();

        self.timed("insert_many", async {
            let txn = self
                .db
                .begin()
                .await
                .map_err(|e| self.store_error("insert_many", &filter, e))?;
            if let Err(e) = Self::insert_models(&txn, &models).await {
                let err = self.store_error("insert_many", &filter, e);
                txn.rollback()
                    .await
                    .map_err(|e| self.store_error("insert_many", &filter, e))?;
                return Err(err);
            }
            txn.commit()
                .await
                .map_err(|e| self.store_error("insert_many", &filter, e))
        })
        .await?;

        info!(collection = E::Model::RESOURCE, count = models.len(), "批量创建完成");
        Ok(models)
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<E::Model>> {
        let select = Self::ordered_select(filter)?;
        let found = self
            .timed("find_one", async {
                select
                    .one(&self.db)
                    .await
                    .map_err(|e| self.store_error("find_one", filter, e))
            })
            .await?;
        if found.is_none() {
            debug!(collection = E::Model::RESOURCE, filter = %filter, "未找到记录");
        }
        Ok(found)
    }

    async fn find_many(&self, filter: &Filter) -> Result<Vec<E::Model>> {
        let select = Self::ordered_select(filter)?;
        let found = self
            .timed("find_many", async {
                select
                    .all(&self.db)
                    .await
                    .map_err(|e| self.store_error("find_many", filter, e))
            })
            .await?;
        debug!(collection = E::Model::RESOURCE, filter = %filter, count = found.len(), "查询完成");
        Ok(found)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<E::Model>> {
        self.find_one(&Filter::by_id(id)).await
    }

    async fn list(&self, skip: u64, limit: u64, filter: &Filter) -> Result<Vec<E::Model>> {
        let select = Self::ordered_select(filter)?.offset(skip).limit(limit);
        let found = self
            .timed("list", async {
                select
                    .all(&self.db)
                    .await
                    .map_err(|e| self.store_error("list", filter, e))
            })
            .await?;
        debug!(
            collection = E::Model::RESOURCE,
            filter = %filter,
            skip,
            limit,
            count = found.len(),
            "分页查询完成"
        );
        Ok(found)
    }

    async fn update_one(
        &self,
        filter: &Filter,
        data: <E::Model as Record>::Update,
    ) -> Result<Option<E::Model>> {
        let Some(current) = self.find_one(filter).await? else {
            warn!(collection = E::Model::RESOURCE, filter = %filter, "更新目标不存在");
            return Ok(None);
        };
        let updated = self
            .timed("update_one", Self::update_model(&self.db, &current, &data))
            .await
            .inspect_err(|e| {
                error!(collection = E::Model::RESOURCE, filter = %filter, error = %e, "更新失败");
            })?;
        info!(collection = E::Model::RESOURCE, id = %updated.id(), "记录已更新");
        Ok(Some(updated))
    }

    async fn update_many(
        &self,
        filter: &Filter,
        data: <E::Model as Record>::Update,
    ) -> Result<bool> {
        let targets = self.find_many(filter).await?;
        if targets.is_empty() {
            warn!(collection = E::Model::RESOURCE, filter = %filter, "批量更新无匹配记录");
            return Ok(false);
        }

        self.timed("update_many", async {
            let txn = self
                .db
                .begin()
                .await
                .map_err(|e| self.store_error("update_many", filter, e))?;
            for current in &targets {
                if let Err(err) = Self::update_model(&txn, current, &data).await {
                    txn.rollback()
                        .await
                        .map_err(|e| self.store_error("update_many", filter, e))?;
                    return Err(err);
                }
            }
            txn.commit()
                .await
                .map_err(|e| self.store_error("update_many", filter, e))
        })
        .await
        .inspect_err(|e| {
            error!(collection = E::Model::RESOURCE, filter = %filter, error = %e, "批量更新失败");
        })?;

        info!(collection = E::Model::RESOURCE, count = targets.len(), "批量更新完成");
        Ok(true)
    }

    async fn delete_one(&self, id: &str) -> Result<bool> {
        let filter = Filter::by_id(id);
        let id_column = Self::column("id")?;
        let result = self
            .timed("delete_one", async {
                E::delete_many()
                    .filter(id_column.eq(id))
                    .exec(&self.db)
                    .await
                    .map_err(|e| self.store_error("delete_one", &filter, e))
            })
            .await?;
        let deleted = result.rows_affected > 0;
        if deleted {
            info!(collection = E::Model::RESOURCE, id, "记录已删除");
        } else {
            warn!(collection = E::Model::RESOURCE, id, "删除目标不存在");
        }
        Ok(deleted)
    }

    async fn delete_many(&self, filter: &Filter) -> Result<bool> {
        let condition = filter.to_condition::<E>()?;
        let result = self
            .timed("delete_many", async {
                E::delete_many()
                    .filter(condition)
                    .exec(&self.db)
                    .await
                    .map_err(|e| self.store_error("delete_many", filter, e))
            })
            .await?;
        info!(
            collection = E::Model::RESOURCE,
            filter = %filter,
            count = result.rows_affected,
            "批量删除完成"
        );
        Ok(result.rows_affected > 0)
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        let condition = filter.to_condition::<E>()?;
        self.timed("count", async {
            E::find()
                .filter(condition)
                .count(&self.db)
                .await
                .map_err(|e| self.store_error("count", filter, e))
        })
        .await
    }
}
