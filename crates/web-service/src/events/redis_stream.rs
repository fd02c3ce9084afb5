//! 把领域事件写入redis stream
//!
//! 每条事件以json格式写入 `message` 字段，下游消费者通过消费组读取。

use super::{DomainEvent, EventHandler};
use color_eyre::eyre::Context;
use color_eyre::Result;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::debug;

/// 项目创建事件所在的stream
pub const PROJECT_CREATED_STREAM: &str = "topic_project_created";

/// redis stream 事件处理器
#[derive(Clone)]
pub struct RedisStreamEventHandler {
    conn: ConnectionManager,
}

impl RedisStreamEventHandler {
    /// 创建处理器并建立redis连接
    ///
    /// [`ConnectionManager`] 会在连接断开后自动重连
    pub async fn connect(conn_str: &str) -> Result<Self> {
        let client = redis::Client::open(conn_str).context("解析 REDIS_URL 失败")?;
        let conn = ConnectionManager::new(client).await.context("连接redis失败")?;
        Ok(Self { conn })
    }

    /// 事件对应的stream名称
    pub fn stream_name(event: &DomainEvent) -> &'static str {
        match event {
            DomainEvent::ProjectCreated(_) => PROJECT_CREATED_STREAM,
        }
    }
}

#[async_trait::async_trait]
impl EventHandler for RedisStreamEventHandler {
    fn name(&self) -> &'static str {
        "redis-stream"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<()> {
        let stream = Self::stream_name(event);
        let payload = serde_json::to_string(event)?;

        let mut conn = self.conn.clone();
        let id: String = conn
            .xadd(stream, "*", &[("message", payload.as_str())])
            .await
            .with_context(|| format!("写入redis stream {stream} 失败"))?;

        debug!("事件 {} 已写入 {} (id = {})", event.name(), stream, id);
        Ok(())
    }
}
