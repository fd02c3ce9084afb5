//! 项目用户授权仓库

use crate::models::ProjectUser;
use crate::repositories::traits::ProjectUserRepositoryTrait;
use crate::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ProjectUserRepository {
    pool: PgPool,
}

impl ProjectUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectUserRepositoryTrait for ProjectUserRepository {
    async fn find_active_grant(&self, project_id: &str, user_id: &str) -> DatabaseResult<Option<ProjectUser>> {
        debug!("🔍 查询用户 {} 在项目 {} 上的授权", user_id, project_id);

        let grant = sqlx::query_as::<_, ProjectUser>(
            r#"
            SELECT project_id, user_id, active
            FROM project_users
            WHERE project_id = $1 AND user_id = $2 AND active = TRUE
            LIMIT 1
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(grant)
    }
}
