use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use color_eyre::eyre::Error;
use database::DatabaseError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

/// 服务层统一的返回类型
pub type AppResult<T> = Result<T, AppError>;

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "name")]
    /// 出错的字段名称
    pub field: String,

    #[schema(example = "Project name is required.")]
    /// 面向用户的错误描述
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
#[derive(Error, Debug)]
pub enum AppError {
    /// 调用方传入了空的标识或者空对象，属于客户端错误，不应重试
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 字段校验失败，携带全部字段错误
    #[error("Validation failed with {} field error(s)", .0.len())]
    ValidationFailed(Vec<FieldError>),

    /// 组织不存在或者未激活
    #[error("Organization {organization_id} is inactive or not found")]
    OrganizationInactive { organization_id: String },

    /// 同一组织下已存在同名项目
    #[error("Project with name {name} already exists in organization {organization_id}")]
    DuplicateName { name: String, organization_id: String },

    /// 资源不存在，仅在接口层使用
    #[error("{0} not found")]
    NotFound(String),

    /// 仓库层数据库错误
    #[error(transparent)]
    RepositoryError(#[from] DatabaseError),

    /// 其他类型错误
    #[error(transparent)]
    InternalError(#[from] Error),
}

impl AppError {
    /// 稳定的错误码，方便客户端识别
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::ValidationFailed(_) => "VALIDATION_ERROR",
            AppError::OrganizationInactive { .. } => "ORGANIZATION_INACTIVE_ERROR",
            AppError::DuplicateName { .. } => "DUPLICATE_PROJECT_NAME",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::RepositoryError(_) | AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::OrganizationInactive { .. } | AppError::DuplicateName { .. } => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RepositoryError(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        AppError::InvalidArgument(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        warn!("Rejected query string: {}", rejection.body_text());
        AppError::InvalidArgument(rejection.body_text())
    }
}

/// 错误返回体
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorReply {
    #[schema(example = "VALIDATION_ERROR")]
    pub code: String,

    pub message: String,

    /// 字段校验错误列表，仅在 `VALIDATION_ERROR` 时出现
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 基础设施错误不把细节暴露给调用方
        let message = match &self {
            AppError::RepositoryError(err) => {
                error!("Repository error: {err}");
                "Something went wrong while accessing storage".to_string()
            }
            AppError::InternalError(err) => {
                error!("Internal error: {err:?}");
                "Something went wrong".to_string()
            }
            other => other.to_string(),
        };

        let code = self.code().to_string();
        let errors = match self {
            AppError::ValidationFailed(errors) => errors,
            _ => Vec::new(),
        };

        (status, Json(ErrorReply { code, message, errors })).into_response()
    }
}
