//! 项目仓库
//!
//! 负责项目相关的数据库操作

use crate::models::Project;
use crate::repositories::traits::ProjectRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use shared_lib::PageRequest;
use sqlx::PgPool;
use tracing::debug;

/// 项目仓库结构体
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// 创建新的项目仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Project>> {
        debug!("🔍 根据 ID 获取项目: {}", id);

        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, organization_id, created_at
            FROM projects
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn find_by_name_and_organization(&self, name: &str, organization_id: &str) -> DatabaseResult<Option<Project>> {
        debug!("🔍 查询组织 {} 下名称为 {} 的项目", organization_id, name);

        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, organization_id, created_at
            FROM projects
            WHERE organization_id = $1 AND name = $2
            LIMIT 1
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// 保存新项目
    ///
    /// 名称唯一性由 `uq_projects_organization_name` 约束兜底，
    /// 并发创建同名项目时后提交的一方会得到 [`DatabaseError::UniqueViolation`]。
    async fn save(&self, project: Project) -> DatabaseResult<Project> {
        debug!("📝 保存项目: {:#?}", project);

        let saved = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (id, name, organization_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, organization_id, created_at;
            "#,
        )
        .bind(&project.id)
        .bind(&project.name)
        .bind(&project.organization_id)
        .bind(project.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_write)?;

        debug!("✅ 项目保存成功: {}", saved.id);
        Ok(saved)
    }

    /// 按组织分页查询项目
    ///
    /// # SQL 查询说明
    ///
    /// `ORDER BY` 子句由 [`PageRequest::order_by_clause`] 生成，只包含白名单内的列名，
    /// 其余参数全部使用预处理语句绑定，不存在SQL注入问题。
    async fn find_page_by_organization(&self, organization_id: &str, page: &PageRequest) -> DatabaseResult<Vec<Project>> {
        debug!("🔍 分页查询组织 {} 的项目 - {}", organization_id, page);

        let sql = format!(
            r#"
            SELECT id, name, organization_id, created_at
            FROM projects
            WHERE organization_id = $1
            {}
            LIMIT $2 OFFSET $3
            "#,
            page.order_by_clause()
        );

        let projects = sqlx::query_as::<_, Project>(&sql)
            .bind(organization_id)
            .bind(i64::from(page.limit))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        debug!("✅ 查询完成 - 找到 {} 个项目", projects.len());
        Ok(projects)
    }
}
