//! 项目服务
//!
//! 提供项目相关的业务逻辑操作：创建、查询、访问检查以及分页搜索。
//!
//! 服务本身不持有可变状态，仓库与事件发布器都通过构造函数注入，
//! 可以安全地在多个请求之间共享。

use crate::events::{DomainEvent, EventSink};
use crate::models::err::{AppError, AppResult};
use crate::models::projects::NewProject;
use crate::services::traits::ProjectServiceTrait;
use crate::services::validation::validate_project;
use chrono::Utc;
use database::{OrganizationRepositoryTrait, Project, ProjectRepositoryTrait, ProjectUserRepositoryTrait};
use shared_lib::{log_execution_time, normalize_limit, normalize_page, PageRequest, PaginationConfig};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// 分页搜索结果
///
/// `page` 和 `limit` 为规整之后实际使用的值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPage {
    pub items: Vec<Project>,
    pub page: u32,
    pub limit: u32,
}

pub struct ProjectService<P, O, U, E>
where
    P: ProjectRepositoryTrait,
    O: OrganizationRepositoryTrait,
    U: ProjectUserRepositoryTrait,
    E: EventSink,
{
    project_repository: Arc<P>,
    organization_repository: Arc<O>,
    project_user_repository: Arc<U>,
    event_sink: Arc<E>,
    pagination: PaginationConfig,
}

impl<P, O, U, E> ProjectService<P, O, U, E>
where
    P: ProjectRepositoryTrait,
    O: OrganizationRepositoryTrait,
    U: ProjectUserRepositoryTrait,
    E: EventSink,
{
    pub fn new(
        project_repository: Arc<P>,
        organization_repository: Arc<O>,
        project_user_repository: Arc<U>,
        event_sink: Arc<E>,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            project_repository,
            organization_repository,
            project_user_repository,
            event_sink,
            pagination,
        }
    }

    /// 把原始分页参数规整为 [`PageRequest`]
    pub fn page_request(&self, page: Option<u32>, limit: Option<u32>, sort_by: Option<&str>, sort_dir: Option<&str>) -> PageRequest {
        let page = normalize_page(page);
        let limit = normalize_limit(limit, self.pagination.default_page_size, self.pagination.max_page_size);
        PageRequest::new(page, limit, sort_by, sort_dir)
    }

    async fn create_project(&self, project: Option<NewProject>) -> AppResult<Project> {
        let Some(project) = project else {
            warn!("Project data can not be null.");
            return Err(AppError::InvalidArgument("Project data can not be null.".to_string()));
        };

        let validation_errors = validate_project(&project);
        if !validation_errors.is_empty() {
            error!(
                "Could not create a project due to insufficient data: {} field error(s).",
                validation_errors.len()
            );
            return Err(AppError::ValidationFailed(validation_errors));
        }

        let name = project.name.trim().to_string();
        let organization_id = project.organization_id.trim().to_string();

        let organization = self.organization_repository.find_by_id(&organization_id).await?;
        if !organization.as_ref().is_some_and(|org| org.active) {
            error!(
                "Organization is inactive or not found. Could not create project {} in org {}",
                name, organization_id
            );
            return Err(AppError::OrganizationInactive { organization_id });
        }

        let existing = self
            .project_repository
            .find_by_name_and_organization(&name, &organization_id)
            .await?;
        if existing.is_some() {
            error!(
                "Project with name {} already exists in organization {}. Specify another name.",
                name, organization_id
            );
            return Err(AppError::DuplicateName { name, organization_id });
        }

        let id = project
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let project = Project {
            id,
            name,
            organization_id,
            created_at: Utc::now(),
        };

        // 预检查与写入之间存在竞争窗口，最终由数据库唯一约束保证不重名
        let saved = match self.project_repository.save(project.clone()).await {
            Ok(saved) => saved,
            Err(err) if err.is_unique_violation() => {
                error!(
                    "Project with name {} already exists in organization {} (constraint: {}).",
                    project.name, project.organization_id, err
                );
                return Err(AppError::DuplicateName {
                    name: project.name,
                    organization_id: project.organization_id,
                });
            }
            Err(err) => return Err(err.into()),
        };

        self.event_sink.publish(DomainEvent::ProjectCreated(saved.clone()));
        info!("Created project {} successfully.", saved.name);

        Ok(saved)
    }

    async fn find_project(&self, id: &str) -> AppResult<Option<Project>> {
        let id = require_non_blank(id, "Project id")?;
        let project = self.project_repository.find_by_id(id).await?;
        if project.is_none() {
            debug!("Project {} not found.", id);
        }
        Ok(project)
    }

    async fn check_access(&self, project_id: &str, user_id: &str) -> AppResult<bool> {
        let project_id = require_non_blank(project_id, "Project ID")?;
        let user_id = require_non_blank(user_id, "User ID")?;
        info!("Check if user {} has access to project {}.", user_id, project_id);

        let grant = self.project_user_repository.find_active_grant(project_id, user_id).await?;
        Ok(grant.is_some())
    }

    async fn search_projects(
        &self,
        organization_id: &str,
        page: Option<u32>,
        limit: Option<u32>,
        sort_by: Option<&str>,
        sort_dir: Option<&str>,
    ) -> AppResult<ProjectPage> {
        let organization_id = require_non_blank(organization_id, "Organization id")?;
        let request = self.page_request(page, limit, sort_by, sort_dir);

        let items = self
            .project_repository
            .find_page_by_organization(organization_id, &request)
            .await?;

        Ok(ProjectPage {
            items,
            page: request.page,
            limit: request.limit,
        })
    }
}

/// 校验标识不为空，返回去掉首尾空白后的值
fn require_non_blank<'a>(value: &'a str, what: &str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        warn!("{} can not be empty.", what);
        return Err(AppError::InvalidArgument(format!("{what} can not be empty.")));
    }
    Ok(trimmed)
}

impl<P, O, U, E> Clone for ProjectService<P, O, U, E>
where
    P: ProjectRepositoryTrait,
    O: OrganizationRepositoryTrait,
    U: ProjectUserRepositoryTrait,
    E: EventSink,
{
    fn clone(&self) -> Self {
        Self {
            project_repository: Arc::clone(&self.project_repository),
            organization_repository: Arc::clone(&self.organization_repository),
            project_user_repository: Arc::clone(&self.project_user_repository),
            event_sink: Arc::clone(&self.event_sink),
            pagination: self.pagination,
        }
    }
}

#[async_trait::async_trait]
impl<P, O, U, E> ProjectServiceTrait for ProjectService<P, O, U, E>
where
    P: ProjectRepositoryTrait,
    O: OrganizationRepositoryTrait,
    U: ProjectUserRepositoryTrait,
    E: EventSink,
{
    async fn create(&self, project: Option<NewProject>) -> AppResult<Project> {
        log_execution_time("ProjectService::create", self.create_project(project)).await
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Project>> {
        log_execution_time("ProjectService::get_by_id", self.find_project(id)).await
    }

    async fn check_project_user_access(&self, project_id: &str, user_id: &str) -> AppResult<bool> {
        log_execution_time(
            "ProjectService::check_project_user_access",
            self.check_access(project_id, user_id),
        )
        .await
    }

    async fn search(
        &self,
        organization_id: &str,
        page: Option<u32>,
        limit: Option<u32>,
        sort_by: Option<&str>,
        sort_dir: Option<&str>,
    ) -> AppResult<ProjectPage> {
        log_execution_time(
            "ProjectService::search",
            self.search_projects(organization_id, page, limit, sort_by, sort_dir),
        )
        .await
    }
}
