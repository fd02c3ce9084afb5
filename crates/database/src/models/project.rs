//! 项目数据库模型
//!
//! 定义项目相关的数据库模型结构体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 项目信息结构体，对应 `projects` 表
///
/// 项目名称在同一个组织内唯一，由数据库唯一约束保证
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub organization_id: String,
    pub created_at: DateTime<Utc>,
}
