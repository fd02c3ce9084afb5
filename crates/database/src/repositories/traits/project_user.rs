//! 项目用户授权仓库 trait 定义

use crate::models::ProjectUser;
use crate::DatabaseResult;

/// 项目用户授权仓库trait定义
#[async_trait::async_trait]
pub trait ProjectUserRepositoryTrait: Send + Sync + 'static {
    /// 查询用户在项目上的有效授权
    ///
    /// 只返回 `active = true` 的授权记录，未授权或授权已失效时返回 `None`
    async fn find_active_grant(&self, project_id: &str, user_id: &str) -> DatabaseResult<Option<ProjectUser>>;
}
