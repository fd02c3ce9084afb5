use chrono::{DateTime, Utc};
use database::Project;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// 新建项目参数
///
/// 字段缺失时反序列化为空字符串，由校验统一报告，
/// 这样缺少多个字段时可以一次性返回全部错误。
#[derive(Deserialize, Debug, Clone, Default, ToSchema, Validate)]
pub struct NewProject {
    #[schema(example = "3f2c5a1e-8d0b-4a8e-9d8c-2b6f4b1c7e11")]
    #[validate(length(max = 64, message = "Project id must be at most 64 characters."))]
    /// 项目ID，不传时由服务端生成
    #[serde(default)]
    pub id: Option<String>,

    #[schema(example = "Alpha")]
    #[validate(custom(function = "validate_name"))]
    /// 项目名称，同一组织内唯一
    #[serde(default)]
    pub name: String,

    #[schema(example = "org1")]
    #[validate(custom(function = "validate_organization_id"))]
    /// 所属组织ID
    #[serde(default)]
    pub organization_id: String,
}

/// 项目名称长度上限，按去掉首尾空白后的字符数计算
pub const MAX_NAME_CHARS: usize = 100;

/// 组织ID长度上限，按去掉首尾空白后的字符数计算
pub const MAX_ORGANIZATION_ID_CHARS: usize = 64;

fn validate_name(value: &str) -> Result<(), ValidationError> {
    required_within(value, MAX_NAME_CHARS, "Project name")
}

fn validate_organization_id(value: &str) -> Result<(), ValidationError> {
    required_within(value, MAX_ORGANIZATION_ID_CHARS, "Organization id")
}

// 保存时会去掉首尾空白，长度按保存的值计算
fn required_within(value: &str, max: usize, label: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new("required").with_message(format!("{label} is required.").into()));
    }
    if value.chars().count() > max {
        return Err(
            ValidationError::new("length").with_message(format!("{label} must be at most {max} characters.").into())
        );
    }
    Ok(())
}

/// 项目返回信息
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
pub struct ProjectInfo {
    #[schema(example = "3f2c5a1e-8d0b-4a8e-9d8c-2b6f4b1c7e11")]
    /// 项目ID
    pub id: String,

    #[schema(example = "Alpha")]
    /// 项目名称
    pub name: String,

    #[schema(example = "org1")]
    /// 所属组织ID
    pub organization_id: String,

    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectInfo {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            organization_id: project.organization_id,
            created_at: project.created_at,
        }
    }
}

/// 按组织搜索项目的查询参数
///
/// 全部为可选参数，超出范围的值会被规整，不会报错
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectSearchQuery {
    /// 页数，从1开始，小于1时按第1页处理
    pub page: Option<i64>,

    /// 每页大小，小于1时使用默认值，超过上限时截断
    pub limit: Option<i64>,

    /// 排序字段：`name` / `created_at` / `id`
    pub sort_by: Option<String>,

    /// 排序方向：`asc` / `desc`
    pub sort_dir: Option<String>,
}

impl ProjectSearchQuery {
    /// 页数收窄到 `u32`，负数按0处理，交给分页规整
    pub fn page(&self) -> Option<u32> {
        self.page.map(saturate_u32)
    }

    /// 每页大小收窄到 `u32`，负数按0处理，交给分页规整
    pub fn limit(&self) -> Option<u32> {
        self.limit.map(saturate_u32)
    }
}

fn saturate_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// 用户对项目的访问检查结果
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ProjectAccess {
    pub project_id: String,
    pub user_id: String,
    pub has_access: bool,
}
