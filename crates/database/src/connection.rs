use crate::{DatabaseError, DatabaseResult};
use shared_lib::{AppConfig, DatabasePoolConfig};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::info;

/// 数据库连接池
pub type DatabasePool = Pool<Postgres>;

/// 获取连接的最长等待时间
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// 空闲1小时的连接会被释放
const IDLE_TIMEOUT: Duration = Duration::from_secs(3600);

/// 连接最长存活6小时，避免长连接导致数据库问题
const MAX_LIFETIME: Duration = Duration::from_secs(3600 * 6);

/// 根据配置生成连接池参数
pub fn pool_options(pool: &DatabasePoolConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .min_connections(pool.min_connections)
        .max_connections(pool.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
}

/// 连接项目数据库并执行 `migrations/` 下的迁移
pub async fn initialize_database(config: &AppConfig) -> DatabaseResult<DatabasePool> {
    let pool = pool_options(&config.database_pool)
        .connect(&config.postgresql_conn_str)
        .await
        .map_err(|e| DatabaseError::connection(format!("连接PostgreSQL数据库失败: {e}")))?;

    info!(
        "🗄️ 数据库连接池创建成功 (min = {}, max = {})",
        config.database_pool.min_connections, config.database_pool.max_connections
    );

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::migration(format!("项目表迁移失败: {e}")))?;

    info!("✅ 项目表迁移完成");

    Ok(pool)
}
