//! 基于 tokio 无界队列的事件总线

use super::{DomainEvent, EventHandler, EventSink};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// 事件接收端，交给 [`spawn_event_dispatcher`] 使用
pub type EventReceiver = UnboundedReceiver<DomainEvent>;

/// 写入进程内队列的事件发布器
///
/// 发送端可以任意clone，所有clone共享同一个队列
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    tx: UnboundedSender<DomainEvent>,
}

/// 创建事件发布器以及对应的接收端
pub fn event_channel() -> (ChannelEventSink, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelEventSink { tx }, rx)
}

impl EventSink for ChannelEventSink {
    fn publish(&self, event: DomainEvent) {
        let name = event.name();
        // 无界队列，send不会阻塞，只有分发任务已经退出时才会失败
        if let Err(err) = self.tx.send(event) {
            warn!("⚠️ 事件 {} 发布失败，分发任务已停止: {}", name, err);
        }
    }
}

/// 启动后台事件分发任务
///
/// 任务在所有发送端都被drop之后才会结束，结束前会处理完队列中已有的事件。
/// 发送端由 [`crate::AppState`] 持有，web服务优雅关闭完成后才会释放，
/// 关闭过程中完成的请求发布的事件同样会被投递。
pub fn spawn_event_dispatcher(mut rx: EventReceiver, handlers: Vec<Arc<dyn EventHandler>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("🚀 事件分发任务启动，处理器数量: {}", handlers.len());

        while let Some(event) = rx.recv().await {
            dispatch(&handlers, &event).await;
        }

        info!("🛑 事件发送端已全部关闭，事件分发任务已停止");
    })
}

async fn dispatch(handlers: &[Arc<dyn EventHandler>], event: &DomainEvent) {
    for handler in handlers {
        match handler.handle(event).await {
            Ok(()) => debug!("事件 {} 已由 {} 处理", event.name(), handler.name()),
            Err(err) => error!("事件 {} 处理失败 (handler = {}): {}", event.name(), handler.name(), err),
        }
    }
}
