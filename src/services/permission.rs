//! 权限服务
//!
//! 每个角色对同一功能只有一条权限记录。

use std::ops::Deref;
use std::sync::Arc;

use super::base::EntityService;
use crate::error::{AdminError, Result};
use crate::models::{CreatePermission, Permission, Role, UpdatePermission};
use crate::repository::{Filter, Repository};

const PAIR_FIELD: &str = "function_id/role_id";

pub struct PermissionService {
    base: EntityService<Permission>,
    roles: Arc<dyn Repository<Role>>,
}

impl Deref for PermissionService {
    type Target = EntityService<Permission>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl PermissionService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn Repository<Permission>>,
        roles: Arc<dyn Repository<Role>>,
    ) -> Self {
        Self {
            base: EntityService::new(repository),
            roles,
        }
    }

    pub async fn create(&self, data: CreatePermission) -> Result<Permission> {
        crate::ensure_validation!(
            !data.function_id.trim().is_empty(),
            "function_id",
            "功能ID不能为空"
        );
        self.ensure_role_exists(&data.role_id).await?;
        self.ensure_unique_pair(&data.function_id, &data.role_id, None)
            .await?;
        self.base.create(data).await
    }

    pub async fn update(&self, id: &str, data: UpdatePermission) -> Result<Option<Permission>> {
        if data.function_id.is_some() || data.role_id.is_some() {
            let Some(current) = self.base.get(id).await? else {
                return Ok(None);
            };
            let function_id = data.function_id.as_deref().unwrap_or(&current.function_id);
            let role_id = data.role_id.as_deref().unwrap_or(&current.role_id);
            if data.role_id.is_some() {
                self.ensure_role_exists(role_id).await?;
            }
            self.ensure_unique_pair(function_id, role_id, Some(id)).await?;
        }
        self.base.update(id, data).await
    }

    pub async fn get_by_function_and_role(
        &self,
        function_id: &str,
        role_id: &str,
    ) -> Result<Option<Permission>> {
        self.base.find_one(&pair_filter(function_id, role_id)).await
    }

    pub async fn get_by_function(&self, function_id: &str) -> Result<Vec<Permission>> {
        self.base
            .find_many(&Filter::new().eq("function_id", function_id))
            .await
    }

    pub async fn get_by_role(&self, role_id: &str) -> Result<Vec<Permission>> {
        self.base
            .find_many(&Filter::new().eq("role_id", role_id))
            .await
    }

    /// 角色的有效权限
    pub async fn get_active_by_role(&self, role_id: &str) -> Result<Vec<Permission>> {
        self.base
            .find_many(&Filter::new().eq("role_id", role_id).eq("is_active", true))
            .await
    }

    async fn ensure_role_exists(&self, role_id: &str) -> Result<()> {
        if self.roles.find_by_id(role_id).await?.is_none() {
            return Err(AdminError::not_found("role", role_id));
        }
        Ok(())
    }

    async fn ensure_unique_pair(
        &self,
        function_id: &str,
        role_id: &str,
        except_id: Option<&str>,
    ) -> Result<()> {
        if self
            .base
            .is_taken(&pair_filter(function_id, role_id), except_id)
            .await?
        {
            return Err(AdminError::conflict(
                "permissions",
                PAIR_FIELD,
                format!("{function_id}/{role_id}"),
            ));
        }
        Ok(())
    }
}

fn pair_filter(function_id: &str, role_id: &str) -> Filter {
    Filter::new()
        .eq("function_id", function_id)
        .eq("role_id", role_id)
}
