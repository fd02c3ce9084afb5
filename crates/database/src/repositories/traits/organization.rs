//! 组织仓库 trait 定义

use crate::models::Organization;
use crate::DatabaseResult;

/// 组织仓库trait定义
#[async_trait::async_trait]
pub trait OrganizationRepositoryTrait: Send + Sync + 'static {
    /// 根据 ID 获取组织信息，不存在时返回 `None`
    async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Organization>>;
}
