//! 项目相关接口
//!

use crate::models::common::{Reply, ReplyPage};
use crate::models::err::{AppError, ErrorReply};
use crate::models::projects::{NewProject, ProjectAccess, ProjectInfo, ProjectSearchQuery};
use crate::routes::extract::{AppJson, AppQuery};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use tracing::{debug, instrument};

/// 创建项目
///
/// 根据用户输入参数创建项目信息，项目名称在同一组织内唯一。
///
/// ## 返回值
///
/// - 200：创建成功，返回项目信息
/// - 400：请求体不是合法的JSON
/// - 422：字段校验失败，`errors` 中包含全部字段错误
/// - 409：组织不存在/未激活，或者组织内已存在同名项目
#[utoipa::path(post,
    path = "/projects",
    tag = "projects",
    request_body = NewProject,
    responses(
        (status = 200, description = "Create project result", body = Reply<ProjectInfo>),
        (status = 400, description = "Malformed request body", body = ErrorReply),
        (status = 409, description = "Organization inactive or duplicate project name", body = ErrorReply),
        (status = 422, description = "Validation failed", body = ErrorReply)
    )
)]
#[instrument(skip(state))]
pub async fn create_project(
    State(state): State<AppState>,
    AppJson(project): AppJson<NewProject>,
) -> Result<Json<Reply<ProjectInfo>>, AppError> {
    debug!("Creating project {:#?}", project);

    let project = state.project_service.create(Some(project)).await?;

    Ok(Json(Reply { data: project.into() }))
}

/// 查询指定项目信息
#[utoipa::path(get,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project found", body = Reply<ProjectInfo>),
        (status = 404, description = "Project not found", body = ErrorReply)
    )
)]
#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<Reply<ProjectInfo>>, AppError> {
    debug!("Getting project id {}", project_id);

    let project = state
        .project_service
        .get_by_id(&project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {project_id}")))?;

    Ok(Json(Reply { data: project.into() }))
}

/// 检查用户是否可以访问项目
///
/// 没有授权时返回 `has_access = false`，不会返回错误
#[utoipa::path(get,
    path = "/projects/{id}/users/{user_id}/access",
    tag = "projects",
    params(
        ("id" = String, Path, description = "Project id"),
        ("user_id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Access check result", body = Reply<ProjectAccess>)
    )
)]
#[instrument(skip(state))]
pub async fn check_project_access(
    State(state): State<AppState>,
    Path((project_id, user_id)): Path<(String, String)>,
) -> Result<Json<Reply<ProjectAccess>>, AppError> {
    let has_access = state
        .project_service
        .check_project_user_access(&project_id, &user_id)
        .await?;

    Ok(Json(Reply {
        data: ProjectAccess {
            project_id,
            user_id,
            has_access,
        },
    }))
}

/// 按组织分页搜索项目
///
/// 分页参数会被规整：page最小为1，limit为空时使用默认值，超过上限时截断。
/// 返回结果中的 `page_index` / `page_size` 是实际使用的值。
#[utoipa::path(get,
    path = "/organizations/{org_id}/projects",
    tag = "projects",
    params(("org_id" = String, Path, description = "Organization id"), ProjectSearchQuery),
    responses(
        (status = 200, description = "Search results", body = ReplyPage<ProjectInfo>),
        (status = 400, description = "Malformed query string", body = ErrorReply)
    )
)]
#[instrument(skip(state))]
pub async fn search_projects(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    AppQuery(query): AppQuery<ProjectSearchQuery>,
) -> Result<Json<ReplyPage<ProjectInfo>>, AppError> {
    debug!("🔍 搜索组织 {} 的项目 {:#?}", org_id, query);

    let result = state
        .project_service
        .search(
            &org_id,
            query.page(),
            query.limit(),
            query.sort_by.as_deref(),
            query.sort_dir.as_deref(),
        )
        .await?;

    Ok(Json(ReplyPage {
        data: result.items.into_iter().map(Into::into).collect(),
        page_index: result.page,
        page_size: result.limit,
    }))
}
