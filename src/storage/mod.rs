//! # 存储提供者
//!
//! 按配置选择关系型（Sea-ORM：SQLite / PostgreSQL）或文档型（MongoDB）后端，
//! 对上层暴露统一的连接生命周期与健康检查接口。提供者在启动时确定，运行期不切换。

mod document;
mod relational;

pub use document::DocumentProvider;
pub use relational::RelationalProvider;

use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::StorageConfig;
use crate::error::{AdminError, Result};

/// 后端类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Relational,
    Document,
}

impl FromStr for ProviderKind {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "postgres" | "postgresql" => Ok(Self::Relational),
            "mongodb" | "mongo" => Ok(Self::Document),
            other => Err(AdminError::config(format!("未知的存储提供者: {other}"))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relational => f.write_str("relational"),
            Self::Document => f.write_str("document"),
        }
    }
}

/// 已连接后端的句柄
#[derive(Clone, Debug)]
pub enum DatabaseHandle {
    Relational(sea_orm::DatabaseConnection),
    Document(mongodb::Database),
}

/// 存储提供者接口
#[async_trait]
pub trait StorageProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// 配置中的提供者名称，如 `sqlite`、`mongodb`
    fn provider_name(&self) -> &str;

    /// 未连接时返回配置错误
    fn get_database(&self) -> Result<DatabaseHandle>;

    fn is_connected(&self) -> bool;

    /// 建立连接；已连接时为空操作
    async fn connect(&self) -> Result<()>;

    /// 释放连接；未连接时为空操作
    async fn close(&self) -> Result<()>;

    async fn ping(&self) -> Result<()>;

    /// 失败时返回空字符串
    async fn get_database_name(&self) -> String;

    /// 失败时返回空字符串
    async fn get_database_version(&self) -> String;

    /// 应用结构变更，返回全部结构步骤的标识
    async fn prepare_schema(&self) -> Result<Vec<String>>;
}

/// 根据配置构造提供者（不连接）
pub fn create_provider(config: &StorageConfig) -> Result<Arc<dyn StorageProvider>> {
    let provider: Arc<dyn StorageProvider> = match config.provider.parse::<ProviderKind>()? {
        ProviderKind::Relational => Arc::new(RelationalProvider::new(config.clone())),
        ProviderKind::Document => Arc::new(DocumentProvider::new(config.clone())),
    };
    Ok(provider)
}

/// 为存储调用加上超时，超时视为可重试的连接错误
pub async fn with_timeout<T, F>(operation: &str, timeout: Duration, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(timeout, future).await.map_err(|_| {
        AdminError::timeout(
            operation,
            u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        )
    })?
}

fn not_connected(provider: &str) -> AdminError {
    AdminError::config(format!("存储提供者 {provider} 尚未连接"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sqlite", ProviderKind::Relational)]
    #[case("postgres", ProviderKind::Relational)]
    #[case("PostgreSQL", ProviderKind::Relational)]
    #[case("mongodb", ProviderKind::Document)]
    #[case("mongo", ProviderKind::Document)]
    fn test_provider_kind_from_str(#[case] input: &str, #[case] expected: ProviderKind) {
        assert_eq!(input.parse::<ProviderKind>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let err = "redis".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, AdminError::Config { .. }));
    }

    #[test]
    fn test_create_provider_does_not_connect() {
        let config = StorageConfig {
            url: "sqlite::memory:".to_string(),
            ..StorageConfig::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Relational);
        assert!(!provider.is_connected());
        assert!(matches!(
            provider.get_database(),
            Err(AdminError::Config { .. })
        ));
    }

    #[tokio::test]
    async fn test_with_timeout_maps_to_retryable() {
        let err = with_timeout("slow op", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(err.is_retryable());
    }
}
