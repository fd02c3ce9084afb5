//! 执行耗时统计
//!
//! 在调用边界上显式包装一个异步操作，结束后输出耗时日志。

use std::future::Future;
use std::time::Instant;
use tracing::debug;

/// 执行 `operation` 并记录其耗时
///
/// ```ignore
/// let project = log_execution_time("ProjectService::get_by_id", async {
///     repo.find_by_id(id).await
/// })
/// .await?;
/// ```
pub async fn log_execution_time<F, T>(name: &'static str, operation: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let output = operation.await;
    debug!(operation = name, elapsed_ms = start.elapsed().as_millis() as u64, "⏱️ {} 执行完成", name);
    output
}
