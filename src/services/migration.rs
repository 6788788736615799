//! 已应用迁移记录服务

use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

use tracing::info;

use super::base::EntityService;
use crate::error::Result;
use crate::models::{CreateMigrationInfo, MigrationInfo};
use crate::repository::{Filter, Repository, now};

pub struct MigrationService {
    base: EntityService<MigrationInfo>,
}

impl Deref for MigrationService {
    type Target = EntityService<MigrationInfo>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl MigrationService {
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<MigrationInfo>>) -> Self {
        Self {
            base: EntityService::new(repository),
        }
    }

    /// 记录尚未登记的迁移，返回新增记录
    pub async fn record_applied(
        &self,
        step_ids: &[String],
        db_provider: &str,
    ) -> Result<Vec<MigrationInfo>> {
        let recorded: HashSet<String> = self
            .base
            .find_many(&Filter::new())
            .await?
            .into_iter()
            .map(|m| m.file_name)
            .collect();

        let applied_at = now();
        let pending: Vec<CreateMigrationInfo> = step_ids
            .iter()
            .filter(|id| !recorded.contains(*id))
            .map(|id| CreateMigrationInfo {
                id: None,
                file_name: id.clone(),
                applied_at,
                db_provider: db_provider.to_string(),
                created_by: None,
            })
            .collect();

        if pending.is_empty() {
            return Ok(Vec::new());
        }

        let inserted = self.base.repository().insert_many(pending).await?;
        info!(count = inserted.len(), provider = %db_provider, "迁移记录已登记");
        Ok(inserted)
    }

    /// 最新的迁移标识（迁移名按时间前缀排序）
    pub async fn latest(&self) -> Result<Option<String>> {
        Ok(self
            .base
            .find_many(&Filter::new())
            .await?
            .into_iter()
            .map(|m| m.file_name)
            .max())
    }
}
