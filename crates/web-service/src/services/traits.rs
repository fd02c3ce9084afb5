//! 服务层 trait 定义
//!
//! 定义服务层的抽象接口，遵循六边形架构的端口适配器模式

use crate::models::err::AppResult;
use crate::models::projects::NewProject;
use crate::services::project::ProjectPage;
use database::Project;

/// 项目服务 trait 定义
///
/// 定义了项目相关的业务逻辑接口，作为应用层的端口(Port)。
/// 路由层以 `Arc<dyn ProjectServiceTrait>` 的形式持有服务。
///
/// 该 trait 作为业务逻辑的抽象接口，具体实现由 [`crate::services::ProjectService`] 提供
#[async_trait::async_trait]
pub trait ProjectServiceTrait: Send + Sync + 'static {
    /// 创建新项目
    ///
    /// 依次执行：字段校验 → 组织检查 → 重名检查 → 写入创建时间 → 持久化 → 发布事件，
    /// 任意一步失败都不会写入数据。
    ///
    /// # 错误
    /// - [`crate::models::err::AppError::InvalidArgument`]：`project` 为空
    /// - [`crate::models::err::AppError::ValidationFailed`]：字段校验失败，包含全部字段错误
    /// - [`crate::models::err::AppError::OrganizationInactive`]：组织不存在或未激活
    /// - [`crate::models::err::AppError::DuplicateName`]：组织内已存在同名项目
    async fn create(&self, project: Option<NewProject>) -> AppResult<Project>;

    /// 根据 ID 获取项目，不存在时返回 `Ok(None)`
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Project>>;

    /// 检查用户是否拥有项目的有效访问授权
    async fn check_project_user_access(&self, project_id: &str, user_id: &str) -> AppResult<bool>;

    /// 按组织分页搜索项目
    ///
    /// page/limit 会被规整为合法值，排序参数非法时使用默认排序，不会因此报错
    async fn search(
        &self,
        organization_id: &str,
        page: Option<u32>,
        limit: Option<u32>,
        sort_by: Option<&str>,
        sort_dir: Option<&str>,
    ) -> AppResult<ProjectPage>;
}
