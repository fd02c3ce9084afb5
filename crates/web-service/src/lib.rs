//! Web服务模块
//!
//! 提供项目管理的 HTTP API 接口和文档服务

use crate::events::EventSink;
use crate::services::{ProjectService, ProjectServiceTrait};
use color_eyre::Result;
use database::{DatabasePool, OrganizationRepository, ProjectRepository, ProjectUserRepository};
use shared_lib::AppConfig;
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::info;

pub mod events;
pub mod models;
pub mod routes;
pub mod services;

/// 应用共享状态
///
/// 路由层只依赖 [`ProjectServiceTrait`]，测试时可以替换为任意实现
#[derive(Clone)]
pub struct AppState {
    pub project_service: Arc<dyn ProjectServiceTrait>,
}

impl AppState {
    pub fn new(project_service: Arc<dyn ProjectServiceTrait>) -> Self {
        Self { project_service }
    }
}

/// 基于PostgreSQL仓库的项目服务
pub type PgProjectService<E> = ProjectService<ProjectRepository, OrganizationRepository, ProjectUserRepository, E>;

/// 使用数据库连接池和事件发布器组装项目服务
pub fn build_project_service<E: EventSink>(pool: DatabasePool, event_sink: Arc<E>, config: &AppConfig) -> PgProjectService<E> {
    ProjectService::new(
        Arc::new(ProjectRepository::new(pool.clone())),
        Arc::new(OrganizationRepository::new(pool.clone())),
        Arc::new(ProjectUserRepository::new(pool)),
        event_sink,
        config.pagination,
    )
}

/// 启动 Web 服务
pub async fn start_web_service(config: Arc<AppConfig>, state: AppState, mut shutdown_rx: Receiver<bool>) -> Result<()> {
    let router = routes::create_app_router(state);

    info!("🚀 启动 Web Service 在 {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            // 发送端被drop同样视为关闭信号
            while !*shutdown_rx.borrow() {
                if shutdown_rx.changed().await.is_err() {
                    break;
                }
            }
            info!("🛑 Web Service 正在关闭...");
        })
        .await?;

    Ok(())
}
