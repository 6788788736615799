//! # 测试辅助函数
//!
//! 基于内存 SQLite 构造与生产相同组合根的应用上下文。

use std::sync::Once;

use tracing::Level;

use crate::app::{AppContext, AppState};
use crate::config::{AppConfig, StorageConfig};
use crate::error::Result;

static INIT: Once = Once::new();

/// 测试中使用的最低 bcrypt 成本
pub const TEST_BCRYPT_COST: u32 = 4;

/// 初始化测试日志
pub fn init_test_env() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// 内存 SQLite 配置
#[must_use]
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.storage = StorageConfig {
        provider: "sqlite".to_string(),
        url: "sqlite::memory:".to_string(),
        ..StorageConfig::default()
    };
    config.security.bcrypt_cost = TEST_BCRYPT_COST;
    config
}

/// 已完成启动流程的内存上下文
pub async fn create_test_context() -> Result<AppContext> {
    init_test_env();
    AppContext::bootstrap(test_config()).await
}

/// 路由测试用的共享状态
pub async fn create_test_state() -> Result<AppState> {
    Ok(AppState::new(create_test_context().await?))
}
