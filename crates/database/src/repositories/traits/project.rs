//! 项目仓库 trait 定义
//!
//! 定义项目数据库操作的抽象接口

use crate::models::Project;
use crate::DatabaseResult;
use shared_lib::PageRequest;

/// 项目仓库trait定义
///
/// 定义了项目相关的数据库操作接口，支持：
/// - 按 ID 查询
/// - 按组织内名称查询
/// - 保存项目
/// - 按组织分页查询
#[async_trait::async_trait]
pub trait ProjectRepositoryTrait: Send + Sync + 'static {
    /// 根据 ID 获取项目信息，不存在时返回 `None`
    async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Project>>;

    /// 根据组织 ID 和项目名称查询项目
    ///
    /// 用于创建项目前的重名检查
    async fn find_by_name_and_organization(&self, name: &str, organization_id: &str) -> DatabaseResult<Option<Project>>;

    /// 保存项目
    ///
    /// # 返回值
    /// 返回已经提交的项目信息
    ///
    /// # 错误
    /// 同一组织下名称冲突时返回 [`crate::DatabaseError::UniqueViolation`]
    async fn save(&self, project: Project) -> DatabaseResult<Project>;

    /// 按组织分页查询项目
    ///
    /// # 参数
    /// - `organization_id`: 组织 ID
    /// - `page`: 规整后的分页与排序参数
    ///
    /// # 返回值
    /// 返回当前页的项目列表，没有数据时返回空列表
    async fn find_page_by_organization(&self, organization_id: &str, page: &PageRequest) -> DatabaseResult<Vec<Project>>;
}
