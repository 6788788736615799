//! 角色服务

use std::ops::Deref;
use std::sync::Arc;

use tracing::info;

use super::base::EntityService;
use crate::error::{AdminError, Result};
use crate::models::{CreateRole, Permission, Role, UpdateRole};
use crate::repository::{Filter, Repository};

pub struct RoleService {
    base: EntityService<Role>,
    permissions: Arc<dyn Repository<Permission>>,
}

impl Deref for RoleService {
    type Target = EntityService<Role>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl RoleService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn Repository<Role>>,
        permissions: Arc<dyn Repository<Permission>>,
    ) -> Self {
        Self {
            base: EntityService::new(repository),
            permissions,
        }
    }

    pub async fn create(&self, data: CreateRole) -> Result<Role> {
        crate::ensure_validation!(!data.name.trim().is_empty(), "name", "角色名不能为空");
        self.ensure_unique_name(&data.name, None).await?;
        self.base.create(data).await
    }

    pub async fn update(&self, id: &str, data: UpdateRole) -> Result<Option<Role>> {
        if let Some(name) = &data.name {
            crate::ensure_validation!(!name.trim().is_empty(), "name", "角色名不能为空");
            self.ensure_unique_name(name, Some(id)).await?;
        }
        self.base.update(id, data).await
    }

    /// 删除角色及其全部权限
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let removed = self
            .permissions
            .delete_many(&Filter::new().eq("role_id", id))
            .await?;
        let deleted = self.base.delete(id).await?;
        if deleted {
            info!(role_id = %id, permissions_removed = removed, "角色已删除");
        }
        Ok(deleted)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Role>> {
        self.base.find_one(&Filter::new().eq("name", name)).await
    }

    async fn ensure_unique_name(&self, name: &str, except_id: Option<&str>) -> Result<()> {
        if self
            .base
            .is_taken(&Filter::new().eq("name", name), except_id)
            .await?
        {
            return Err(AdminError::conflict("roles", "name", name));
        }
        Ok(())
    }
}
