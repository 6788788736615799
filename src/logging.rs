//! # 日志初始化
//!
//! `RUST_LOG` 优先，否则使用配置中的级别，并默认关闭 SQL 语句日志。

use std::env;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// 构造默认过滤规则
#[must_use]
pub fn default_filter(level: &str) -> String {
    format!("{level},admin_hub=debug,sqlx::query=off,sea_orm::query=warn,sqlx=warn,mongodb=warn")
}

/// 初始化日志系统，重复调用时静默忽略
pub fn init_logging(log_level: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| default_filter(level));

    let initialized = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter.into()))
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .is_ok();

    if initialized {
        if env::var("RUST_LOG").is_ok_and(|v| v.contains("sqlx::query=info") || v.contains("sqlx::query=debug")) {
            tracing::info!("SQLx 查询日志已开启");
        } else {
            tracing::debug!("SQLx 查询日志已关闭");
        }
    }
}
