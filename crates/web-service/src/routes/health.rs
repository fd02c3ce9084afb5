//! 健康检查接口

use axum::Json;
use serde_json::{json, Value};
use tracing::instrument;

/// 服务存活检查
#[utoipa::path(get, path = "/health", tag = "health",
    responses(
        (status = 200, description = "Service is running")
    )
)]
#[instrument]
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "web-service"
    }))
}
