//! # 配置管理器
//!
//! 按顺序解析配置文件路径（显式参数 > `ADMIN_CONFIG_PATH` > `config/config.{RUST_ENV}.toml`），
//! 读取 TOML 后应用 `ADMIN_` 前缀的环境变量覆盖，最后统一验证。

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::AppConfig;
use crate::error::{AdminError, Result};

/// 环境变量前缀
const ENV_PREFIX: &str = "ADMIN_";

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 加载、覆盖并验证配置
    pub fn load(explicit_path: Option<&Path>) -> Result<AppConfig> {
        let config_path = Self::resolve_path(explicit_path);
        let mut config = Self::load_config_file(&config_path)?;

        let env_overrides = Self::build_env_overrides();
        Self::apply_env_overrides(&mut config, &env_overrides)?;
        config.validate()?;

        info!(
            path = %config_path.display(),
            provider = %config.storage.provider,
            overrides = env_overrides.len(),
            "配置加载完成"
        );
        Ok(config)
    }

    /// 解析配置文件路径
    #[must_use]
    pub fn resolve_path(explicit_path: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit_path {
            return path.to_path_buf();
        }
        if let Ok(path) = env::var("ADMIN_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        PathBuf::from(format!("config/config.{env}.toml"))
    }

    /// 加载配置文件
    pub fn load_config_file(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            return Err(AdminError::config(format!(
                "配置文件不存在: {}",
                path.display()
            )));
        }

        let config_content = std::fs::read_to_string(path).map_err(|e| {
            AdminError::config_with_source(format!("读取配置文件失败: {}", path.display()), e)
        })?;

        toml::from_str(&config_content).map_err(|e| {
            AdminError::config_with_source(
                format!("TOML解析失败 - 配置文件: {}", path.display()),
                e,
            )
        })
    }

    /// 构建环境变量覆盖映射
    ///
    /// `ADMIN_STORAGE_URL` -> `storage.url`
    fn build_env_overrides() -> HashMap<String, String> {
        let overrides: HashMap<String, String> = env::vars()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|config_key| (config_key.to_lowercase().replace('_', "."), value))
            })
            .filter(|(path, _)| path != "config.path")
            .collect();

        debug!("发现 {} 个环境变量覆盖", overrides.len());
        overrides
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(
        config: &mut AppConfig,
        overrides: &HashMap<String, String>,
    ) -> Result<()> {
        for (path, value) in overrides {
            debug!(
                "应用环境变量覆盖: {} = {}",
                path,
                if path.contains("url") { "***" } else { value }
            );
            Self::apply_override_to_config(config, path, value)?;
        }
        Ok(())
    }

    /// 将单个覆盖项写入配置对象
    fn apply_override_to_config(config: &mut AppConfig, path: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = path.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => config.server.host = value.to_string(),
            ["server", "port"] => config.server.port = parse_value(path, value)?,
            ["server", "api", "prefix"] => config.server.api_prefix = value.to_string(),
            ["server", "cors", "origins"] => {
                config.server.cors_origins = value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            ["server", "expose", "internal", "errors"] => {
                config.server.expose_internal_errors = parse_value(path, value)?;
            }
            ["storage", "provider"] => config.storage.provider = value.to_string(),
            ["storage", "url"] => config.storage.url = value.to_string(),
            ["storage", "database"] | ["storage", "database", "name"] => {
                config.storage.database_name = Some(value.to_string());
            }
            ["storage", "max", "connections"] => {
                config.storage.max_connections = parse_value(path, value)?;
            }
            ["storage", "connect", "timeout"] => {
                config.storage.connect_timeout = parse_value(path, value)?;
            }
            ["storage", "operation", "timeout", "ms"] => {
                config.storage.operation_timeout_ms = parse_value(path, value)?;
            }
            ["cache", "provider"] => config.cache.provider = value.to_string(),
            ["logging", "level"] => config.logging.level = value.to_string(),
            ["security", "bcrypt", "cost"] => {
                config.security.bcrypt_cost = parse_value(path, value)?;
            }
            _ => {
                warn!("未知的配置路径，忽略环境变量覆盖: {}", path);
            }
        }

        Ok(())
    }
}

fn parse_value<T>(path: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse().map_err(|e| {
        AdminError::config_with_source(format!("无效的配置值 {path}: {value}"), e)
    })
}
