//! 项目用户授权模型

use serde::{Deserialize, Serialize};

/// 用户对项目的访问授权，对应 `project_users` 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectUser {
    pub project_id: String,
    pub user_id: String,
    pub active: bool,
}
