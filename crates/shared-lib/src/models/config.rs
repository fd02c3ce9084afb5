use color_eyre::eyre::{eyre, Context};
use color_eyre::{Help, Result};
use std::sync::Arc;

/// 默认监听地址
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// 项目分页查询的默认每页大小
pub const DEFAULT_PROJECT_PAGE_SIZE: u32 = 20;

/// 项目分页查询的最大每页大小
pub const MAX_PROJECT_PAGE_SIZE: u32 = 100;

/// 连接池默认最小连接数
pub const DEFAULT_DB_MIN_CONNECTIONS: u32 = 5;

/// 连接池默认最大连接数，生产环境30~40即可
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 40;

/// 数据库连接池配置
///
/// 可通过环境变量 `DATABASE_MIN_CONNECTIONS` / `DATABASE_MAX_CONNECTIONS` 来调整
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabasePoolConfig {
    /// 启动时预留的连接数
    pub min_connections: u32,

    /// 连接数上限
    pub max_connections: u32,
}

impl Default for DatabasePoolConfig {
    fn default() -> Self {
        Self {
            min_connections: DEFAULT_DB_MIN_CONNECTIONS,
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
        }
    }
}

/// 分页配置
///
/// 可通过环境变量 `PAGINATION_PROJECT_DEFAULT` / `PAGINATION_PROJECT_MAX` 来调整
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// 未指定limit时使用的每页大小
    pub default_page_size: u32,

    /// 每页大小上限，超出会被截断
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PROJECT_PAGE_SIZE,
            max_page_size: MAX_PROJECT_PAGE_SIZE,
        }
    }
}

/// 程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// postgresql数据库链接字符串
    pub postgresql_conn_str: String,

    /// 数据库连接池大小
    pub database_pool: DatabasePoolConfig,

    /// redis链接字符串
    ///
    /// 为空时不会把事件投递到redis stream，仅记录日志
    pub redis_conn_str: Option<String>,

    /// Web服务监听地址
    pub bind_addr: String,

    /// 项目搜索的分页配置
    pub pagination: PaginationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Arc<AppConfig>> {
        // 加载.env文件中的数据注入到环境变量中，方便本地测试
        // 线上环境部署时会直接使用环境变量，不需要.env文件
        if let Err(err) = dotenvy::dotenv() {
            tracing::debug!("未加载 .env 文件: {err}");
        }

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        Ok(Arc::new(config))
    }

    /// 使用自定义的变量读取函数构建配置
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 读取数据库地址信息（仅支持postgresql）
        let db_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| eyre!("Can not load DATABASE_URL in environment"))
            .suggestion("设置 DATABASE_URL 环境变量")?;

        let default_page_size = parse_or_default(&lookup, "PAGINATION_PROJECT_DEFAULT", DEFAULT_PROJECT_PAGE_SIZE)?;
        let max_page_size = parse_or_default(&lookup, "PAGINATION_PROJECT_MAX", MAX_PROJECT_PAGE_SIZE)?;

        let min_connections = parse_or_default(&lookup, "DATABASE_MIN_CONNECTIONS", DEFAULT_DB_MIN_CONNECTIONS)?;
        let max_connections = parse_or_default(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;

        if max_connections == 0 || min_connections > max_connections {
            return Err(eyre!("数据库连接池大小不合法: min={min_connections}, max={max_connections}"))
                .suggestion("DATABASE_MAX_CONNECTIONS 必须大于0，且不小于 DATABASE_MIN_CONNECTIONS");
        }

        if default_page_size == 0 || max_page_size == 0 {
            return Err(eyre!("分页大小必须大于0")).suggestion("检查 PAGINATION_PROJECT_DEFAULT / PAGINATION_PROJECT_MAX");
        }

        Ok(AppConfig {
            postgresql_conn_str: db_url,
            database_pool: DatabasePoolConfig {
                min_connections,
                max_connections,
            },
            redis_conn_str: lookup("REDIS_URL").filter(|s| !s.trim().is_empty()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            pagination: PaginationConfig {
                default_page_size: default_page_size.min(max_page_size),
                max_page_size,
            },
        })
    }
}

fn parse_or_default<F>(lookup: &F, key: &str, default: u32) -> Result<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .with_context(|| format!("环境变量 {key} 不是合法的数字: {raw}")),
    }
}
