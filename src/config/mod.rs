//! # 配置管理模块
//!
//! 处理应用配置加载、环境变量覆盖和验证。配置只在启动时读取一次。

mod app_config;
mod manager;
mod storage;

pub use app_config::{
    AppConfig, CacheConfig, LoggingConfig, SecurityConfig, ServerConfig,
};
pub use manager::ConfigManager;
pub use storage::StorageConfig;

/// 按默认规则加载配置
pub fn load_config() -> crate::error::Result<AppConfig> {
    ConfigManager::load(None)
}
