//! # 应用配置结构定义

use serde::{Deserialize, Serialize};

use super::StorageConfig;
use crate::ensure_config;
use crate::error::Result;
use crate::storage::ProviderKind;

/// 应用主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 管理接口服务配置
    pub server: ServerConfig,
    /// 存储配置
    pub storage: StorageConfig,
    /// 缓存配置
    pub cache: CacheConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 安全配置
    pub security: SecurityConfig,
}

/// 管理接口服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 路由前缀
    pub api_prefix: String,
    /// 允许的跨域来源，空表示不启用 CORS，`*` 表示任意来源
    pub cors_origins: Vec<String>,
    /// 是否在响应中暴露内部错误详情
    pub expose_internal_errors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9090,
            api_prefix: "/api".to_string(),
            cors_origins: Vec::new(),
            expose_internal_errors: false,
        }
    }
}

/// 缓存配置，仅用于应用信息上报
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub provider: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: "memory".to_string(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 默认日志级别，`RUST_LOG` 优先
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// 安全配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// bcrypt 计算成本
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AppConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        ensure_config!(self.server.port > 0, "无效的服务器端口: {}", self.server.port);
        ensure_config!(
            self.server.api_prefix.len() > 1
                && self.server.api_prefix.starts_with('/')
                && !self.server.api_prefix.ends_with('/'),
            "api_prefix 必须以 / 开头且不以 / 结尾: {}",
            self.server.api_prefix
        );

        self.storage.provider.parse::<ProviderKind>()?;
        ensure_config!(!self.storage.url.trim().is_empty(), "存储URL不能为空");
        ensure_config!(self.storage.max_connections > 0, "存储最大连接数必须大于0");
        ensure_config!(self.storage.connect_timeout > 0, "连接超时时间必须大于0");
        ensure_config!(self.storage.operation_timeout_ms > 0, "操作超时时间必须大于0");

        ensure_config!(
            (4..=31).contains(&self.security.bcrypt_cost),
            "bcrypt_cost 必须在 4..=31 之间: {}",
            self.security.bcrypt_cost
        );

        Ok(())
    }

    /// 管理接口监听地址
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut config = AppConfig::default();
        config.storage.provider = "cassandra".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cassandra"));
    }

    #[test]
    fn test_api_prefix_shape() {
        for prefix in ["", "/", "api", "/api/"] {
            let mut config = AppConfig::default();
            config.server.api_prefix = prefix.to_string();
            assert!(config.validate().is_err(), "prefix {prefix:?} should be rejected");
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.storage.operation_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [storage]
            provider = "mongodb"
            url = "mongodb://localhost:27017"
            database_name = "admin"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.provider, "mongodb");
        assert_eq!(config.server.api_prefix, "/api");
        assert_eq!(config.cache.provider, "memory");
        assert!(config.validate().is_ok());
    }
}
