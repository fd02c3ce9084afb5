//! 组织数据库模型

use serde::{Deserialize, Serialize};

/// 组织信息，对应 `organizations` 表
///
/// 只有处于激活状态的组织才能创建新项目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub active: bool,
}
