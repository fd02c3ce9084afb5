//! 组织仓库

use crate::models::Organization;
use crate::repositories::traits::OrganizationRepositoryTrait;
use crate::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

/// 组织仓库结构体
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl OrganizationRepositoryTrait for OrganizationRepository {
    async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Organization>> {
        debug!("🔍 根据 ID 获取组织: {}", id);

        let organization = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, active
            FROM organizations
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organization)
    }
}
