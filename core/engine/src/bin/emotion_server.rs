use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use emotion_engine::bootstrap::{EmotionEngine, EmotionEngineBuilder};
use emotion_engine::config_manager::{ServerConfig, DEFAULT_CONFIG_FILE};
use emotion_engine::error::EngineResult;
use emotion_engine::http_api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,emotion_engine=debug")),
        )
        .init();

    // 1. 解析命令行参数
    let args: Vec<String> = std::env::args().collect();
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    info!(path = %config_path.display(), "loading config");

    // 2. 加载配置文件
    let config = ServerConfig::load(&config_path)?;
    info!(
        classifier = ?config.classifier.kind,
        translation = ?config.translation.kind,
        log = %config.log.path.display(),
        "config loaded"
    );

    // 3. 初始化引擎
    let engine = Arc::new(initialize_engine(&config).await?);

    // 4. 启动 HTTP 服务器
    let app = http_api::router(Arc::clone(&engine));
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    engine.shutdown().await?;
    Ok(())
}

/// 初始化 EmotionEngine
async fn initialize_engine(config: &ServerConfig) -> EngineResult<EmotionEngine> {
    let engine = EmotionEngineBuilder::from_config(config)?.build()?;
    engine.boot().await?;
    Ok(engine)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
