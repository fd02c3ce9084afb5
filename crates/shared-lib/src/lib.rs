//! 🔧 共享库模块
//!
//! 这个模块包含了在多个服务之间共享的通用代码，包括：
//! - 程序配置
//! - 分页辅助工具
//! - 执行耗时统计

pub mod models;
pub mod pagination;
pub mod timing;

// 重新导出常用类型
pub use models::{AppConfig, DatabasePoolConfig, PaginationConfig};
pub use pagination::{normalize_limit, normalize_page, PageRequest, SortDirection, SortField};
pub use timing::log_execution_time;
