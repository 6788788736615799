//! # 系统信息处理器

use std::sync::OnceLock;
use std::time::Instant;

use axum::extract::State;
use axum::response::Response;
use serde::Serialize;

use crate::app::AppState;
use crate::error::Result;
use crate::management::response;

/// 全局启动时间
static START_TIME: OnceLock<Instant> = OnceLock::new();

/// 初始化启动时间
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

fn uptime_seconds() -> u64 {
    START_TIME.get_or_init(Instant::now).elapsed().as_secs()
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
}

#[derive(Serialize)]
struct DatabaseHealth {
    status: &'static str,
    provider: String,
    database_name: String,
}

/// 进程存活探针
pub async fn ping_handler() -> &'static str {
    "pong"
}

/// 进程状态
pub async fn health_check() -> Response {
    response::success(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: uptime_seconds(),
    })
}

/// 存储连通性
pub async fn database_health(State(state): State<AppState>) -> Result<Response> {
    state.provider.ping().await?;
    Ok(response::success(DatabaseHealth {
        status: "ok",
        provider: state.provider.provider_name().to_string(),
        database_name: state.provider.get_database_name().await,
    }))
}

/// 缓存的应用信息
pub async fn application_info(State(state): State<AppState>) -> Result<Response> {
    let info = state.services.application_info.get_application_info().await?;
    Ok(response::success(info.as_ref()))
}
