//! # Admin Hub 主程序

use std::path::PathBuf;

use admin_hub::{
    AppContext, AppState, Result,
    config::ConfigManager,
    logging,
    management::ManagementServer,
};
use clap::Parser;
use tracing::{error, info};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "admin-hub", version, about = "Admin backend with pluggable storage")]
struct Cli {
    /// 配置文件路径
    #[arg(short, long, env = "ADMIN_CONFIG_PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::load(cli.config.as_deref())?;
    logging::init_logging(Some(&config.logging.level));

    info!(
        provider = %config.storage.provider,
        addr = %config.listen_addr(),
        "服务启动"
    );

    let context = match AppContext::bootstrap(config).await {
        Ok(context) => context,
        Err(e) => {
            error!(error = ?e, "启动失败");
            return Err(e);
        }
    };

    let state = AppState::new(context);
    let server = ManagementServer::new(state.clone());
    let served = server.serve(shutdown_signal()).await;

    if let Err(e) = state.shutdown().await {
        error!(error = %e, "关闭存储连接失败");
    }
    served?;

    info!("服务正常关闭");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "监听关闭信号失败");
        std::future::pending::<()>().await;
    }
    info!("收到关闭信号");
}
