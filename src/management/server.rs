//! # 管理服务器
//!
//! Axum HTTP服务器，提供管理API

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware;
use axum::routing::get;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::handlers::system;
use super::response::reveal_internal_errors;
use crate::app::AppState;
use crate::config::ServerConfig;
use crate::error::{AdminError, Result};

/// 管理服务器
pub struct ManagementServer {
    addr: String,
    router: Router,
}

impl ManagementServer {
    /// 创建新的管理服务器
    #[must_use]
    pub fn new(state: AppState) -> Self {
        let addr = state.config.listen_addr();
        let router = create_router(state);
        Self { addr, router }
    }

    /// 启动服务器，`shutdown` 完成后优雅退出
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(&self.addr).await.map_err(|e| {
            AdminError::config_with_source(format!("无法监听地址: {}", self.addr), e)
        })?;
        info!(addr = %self.addr, "管理服务器已启动");

        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await?;

        info!("管理服务器已停止");
        Ok(())
    }
}

/// 构建完整路由：`/ping`、API前缀下的管理路由，以及追踪与CORS中间件
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;
    system::init_start_time();

    let api_prefix = server.api_prefix.clone();
    let expose_internal_errors = server.expose_internal_errors;
    let cors = cors_layer(server);

    let mut app = Router::new()
        .nest(&api_prefix, super::routes::create_routes(state))
        .route("/ping", get(system::ping_handler));
    if expose_internal_errors {
        app = app.layer(middleware::map_response(reveal_internal_errors));
    }

    let service_builder = ServiceBuilder::new().layer(TraceLayer::new_for_http());
    match cors {
        Some(cors) => app.layer(service_builder.layer(cors)),
        None => app.layer(service_builder),
    }
}

fn cors_layer(config: &ServerConfig) -> Option<CorsLayer> {
    if config.cors_origins.is_empty() {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]);

    if config.cors_origins.iter().any(|origin| origin == "*") {
        return Some(layer.allow_origin(Any));
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<std::result::Result<Vec<_>, _>>();

    match origins {
        Ok(origins) => Some(layer.allow_origin(origins)),
        Err(e) => {
            warn!(error = %e, "CORS 源配置无效，允许任意来源");
            Some(layer.allow_origin(Any))
        }
    }
}
