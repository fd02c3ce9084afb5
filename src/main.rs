use color_eyre::eyre::Context;
use color_eyre::Result;
use database::initialize_database;
use shared_lib::AppConfig;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use web_service::events::{event_channel, spawn_event_dispatcher, EventHandler, LoggingEventHandler, RedisStreamEventHandler};
use web_service::{build_project_service, start_web_service, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // 默认info级别，可通过 RUST_LOG 环境变量调整
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app_config = AppConfig::load()?;

    let pool = initialize_database(&app_config)
        .await
        .context("Initialize postgresql database")?;

    // 关闭信号只通知web服务，事件分发任务在发送端全部释放后自动退出
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut handlers: Vec<Arc<dyn EventHandler>> = vec![Arc::new(LoggingEventHandler)];
    match &app_config.redis_conn_str {
        Some(conn_str) => {
            let handler = RedisStreamEventHandler::connect(conn_str).await?;
            info!("📡 项目事件将写入redis stream");
            handlers.push(Arc::new(handler));
        }
        None => warn!("未配置 REDIS_URL，项目事件仅记录日志"),
    }

    let (event_sink, event_rx) = event_channel();
    let dispatcher = spawn_event_dispatcher(event_rx, handlers);

    let project_service = build_project_service(pool, Arc::new(event_sink), &app_config);
    let state = AppState::new(Arc::new(project_service));

    let mut web = tokio::spawn(start_web_service(Arc::clone(&app_config), state, shutdown_rx));

    let web_finished = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("Listen for shutdown signal")?;
            info!("收到退出信号，开始关闭服务...");
            false
        }
        result = &mut web => {
            warn!("Web Service 提前退出");
            result.context("Join web service task")??;
            true
        }
    };

    // 所有接收端都已退出时发送会失败，此时无需处理
    let _ = shutdown_tx.send(true);

    if !web_finished {
        web.await.context("Join web service task")??;
    }
    // web服务退出后 AppState 已释放，分发任务处理完剩余事件即结束
    dispatcher.await.context("Join event dispatcher task")?;

    info!("👋 服务已退出");
    Ok(())
}
