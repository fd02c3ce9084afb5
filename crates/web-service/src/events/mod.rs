//! 领域事件
//!
//! 服务层只依赖 [`EventSink`]，事件的投递方式由具体实现决定：
//!
//! - [`ChannelEventSink`]：写入进程内的无界队列，由后台任务分发给各个 [`EventHandler`]
//! - [`LoggingEventHandler`]：记录事件日志
//! - [`RedisStreamEventHandler`]：把事件写入redis stream，供下游消费者处理

pub mod channel;
pub mod redis_stream;

pub use channel::{event_channel, spawn_event_dispatcher, ChannelEventSink, EventReceiver};
pub use redis_stream::{RedisStreamEventHandler, PROJECT_CREATED_STREAM};

use color_eyre::Result;
use database::Project;
use serde::Serialize;
use tracing::info;

/// 领域事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum DomainEvent {
    /// 项目已创建并持久化
    ProjectCreated(Project),
}

impl DomainEvent {
    /// 事件名称，用于日志与消息路由
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::ProjectCreated(_) => "project_created",
        }
    }
}

/// 事件发布端口
///
/// `publish` 必须立即返回，不能因为下游处理缓慢而阻塞调用方。
pub trait EventSink: Send + Sync + 'static {
    fn publish(&self, event: DomainEvent);
}

/// 事件处理器
///
/// 由事件分发任务依次调用，单个处理器失败不会影响其他处理器
#[async_trait::async_trait]
pub trait EventHandler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle(&self, event: &DomainEvent) -> Result<()>;
}

/// 只记录日志的事件处理器
#[derive(Debug, Clone, Default)]
pub struct LoggingEventHandler;

#[async_trait::async_trait]
impl EventHandler for LoggingEventHandler {
    fn name(&self) -> &'static str {
        "logging"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<()> {
        match event {
            DomainEvent::ProjectCreated(project) => {
                info!(
                    "📣 事件 {}: 项目 {} ({}) 创建于组织 {}",
                    event.name(),
                    project.name,
                    project.id,
                    project.organization_id
                );
            }
        }
        Ok(())
    }
}
