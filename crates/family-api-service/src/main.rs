//! 家庭任务后端服务
//!
//! 提供用户、家庭、帖子、树与任务等资源的 REST API。

use axum::http::HeaderValue;
use family_api::{AppState, MemoryStore, PgStore, Store, build_router, handlers::SERVICE_NAME};
use family_shared::{
    config::{AppConfig, StorageBackend},
    database::Database,
    observability,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 统一加载配置：config/*.toml + FAMILY_ 前缀环境变量，任一项非法即拒绝启动
    let config = AppConfig::load(SERVICE_NAME)?;

    let obs_config = config.observability.clone().with_service_name(SERVICE_NAME);
    let _guard = observability::init(&obs_config).await?;

    info!(
        environment = %config.environment,
        backend = ?config.storage.backend,
        "Starting {} on {}",
        SERVICE_NAME,
        config.server_addr()
    );

    match config.storage.backend {
        StorageBackend::Postgres => {
            let db = Database::connect(&config.database).await?;
            let store = PgStore::new(db.clone());
            if config.storage.create_schema {
                store.ensure_schema().await?;
            }
            run(&config, store).await?;
            db.close().await;
        }
        StorageBackend::Memory => {
            if config.is_production() {
                warn!("Memory storage is not persistent, all data is lost on restart");
            }
            run(&config, MemoryStore::new()).await?;
        }
    }

    info!("Server shutdown complete");

    Ok(())
}

async fn run<S: Store>(config: &AppConfig, store: S) -> anyhow::Result<()> {
    let app = build_router(AppState::new(store)).layer(cors_layer(config));

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 优雅关闭：收到 SIGTERM 或 Ctrl+C 后停止接收新连接，等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// CORS 配置：通过 FAMILY_CORS_ORIGINS 环境变量控制允许的来源
///
/// 未设置时允许任意来源，便于本地开发。
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let allowed_origins = std::env::var("FAMILY_CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

    if allowed_origins == "*" {
        if config.is_production() {
            warn!("FAMILY_CORS_ORIGINS=\"*\" 在生产环境中不安全，请设置为具体域名");
        }
        info!("CORS allowed_origins: * (all origins)");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        info!("CORS allowed_origins: {}", allowed_origins);
        let origins: Vec<_> = allowed_origins
            .split(',')
            .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// 监听关闭信号
///
/// 收到 SIGTERM 或 Ctrl+C 任一信号后返回，触发 axum 的优雅关闭流程。
/// 信号处理器注册失败时该分支永不完成，由另一分支负责退出。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("注册 Ctrl+C 处理器失败: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("注册 SIGTERM 处理器失败: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
