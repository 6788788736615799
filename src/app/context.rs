//! # 应用上下文
//!
//! 统一持有跨模块共享的实例：配置、存储提供者、仓储工厂和全部服务。
//! 启动流程：构造提供者 → 连接 → 结构准备 → 登记迁移 → 写入应用信息。

use std::ops::Deref;
use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::error::{Context, Result};
use crate::repository::RepositoryFactory;
use crate::services::{
    ApplicationInfoService, MenuService, MigrationService, PermissionService, RoleService,
    Services, SettingService, UserService,
};
use crate::storage::{StorageProvider, create_provider};

pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub provider: Arc<dyn StorageProvider>,
    pub repositories: Arc<RepositoryFactory>,
    pub services: Services,
}

impl AppContext {
    /// 根据配置完成全部启动步骤
    pub async fn bootstrap(config: AppConfig) -> Result<Self> {
        config.storage.ensure_database_path()?;
        let provider = create_provider(&config.storage)?;
        provider
            .connect()
            .await
            .with_context(|| format!("连接存储失败: {}", config.storage.provider))?;
        Self::from_provider(config, provider).await
    }

    /// 基于已连接的提供者组装上下文
    pub async fn from_provider(
        config: AppConfig,
        provider: Arc<dyn StorageProvider>,
    ) -> Result<Self> {
        let steps = provider.prepare_schema().await.context("结构准备失败")?;

        let repositories = Arc::new(RepositoryFactory::new(
            Arc::clone(&provider),
            config.storage.operation_timeout(),
        ));
        let services = build_services(&config, &provider, &repositories)?;

        services
            .migrations
            .record_applied(&steps, provider.provider_name())
            .await
            .context("登记迁移记录失败")?;
        services
            .application_info
            .set_application_info()
            .await
            .context("写入应用信息失败")?;

        info!(
            provider = %provider.provider_name(),
            kind = %provider.kind(),
            schema_steps = steps.len(),
            "应用上下文初始化完成"
        );

        Ok(Self {
            config: Arc::new(config),
            provider,
            repositories,
            services,
        })
    }

    /// 释放存储连接
    pub async fn shutdown(&self) -> Result<()> {
        self.provider.close().await?;
        info!("存储连接已关闭");
        Ok(())
    }
}

fn build_services(
    config: &AppConfig,
    provider: &Arc<dyn StorageProvider>,
    repositories: &RepositoryFactory,
) -> Result<Services> {
    let migrations = Arc::new(MigrationService::new(repositories.get_repository()?));
    let permissions = Arc::new(PermissionService::new(
        repositories.get_repository()?,
        repositories.get_repository()?,
    ));

    Ok(Services {
        users: Arc::new(UserService::new(
            repositories.get_repository()?,
            config.security.bcrypt_cost,
        )),
        roles: Arc::new(RoleService::new(
            repositories.get_repository()?,
            repositories.get_repository()?,
        )),
        menus: Arc::new(MenuService::new(
            repositories.get_repository()?,
            Arc::clone(&permissions),
        )),
        settings: Arc::new(SettingService::new(repositories.get_repository()?)),
        application_info: Arc::new(ApplicationInfoService::new(
            repositories.get_repository()?,
            Arc::clone(provider),
            Arc::clone(&migrations),
            config.cache.provider.clone(),
        )),
        permissions,
        migrations,
    })
}

/// 路由共享状态
#[derive(Clone)]
pub struct AppState(pub Arc<AppContext>);

impl AppState {
    #[must_use]
    pub fn new(context: AppContext) -> Self {
        Self(Arc::new(context))
    }
}

impl Deref for AppState {
    type Target = AppContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
