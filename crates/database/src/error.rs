use thiserror::Error;

/// 数据库操作错误类型
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLX 错误
    #[error("数据库操作错误: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// 违反唯一约束，例如同一组织下的项目重名
    #[error("违反唯一约束: {0}")]
    UniqueViolation(String),

    /// 连接错误
    #[error("数据库连接错误: {0}")]
    ConnectionError(String),

    /// 迁移错误
    #[error("数据库迁移错误: {0}")]
    MigrationError(String),
}

impl DatabaseError {
    /// 创建连接错误
    pub fn connection<T: ToString>(msg: T) -> Self {
        Self::ConnectionError(msg.to_string())
    }

    /// 创建迁移错误
    pub fn migration<T: ToString>(msg: T) -> Self {
        Self::MigrationError(msg.to_string())
    }

    /// 是否为唯一约束冲突
    ///
    /// 仓库层通常已经把冲突转换为 [`DatabaseError::UniqueViolation`]，
    /// 这里同时兼容未经转换的原始 sqlx 错误。
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DatabaseError::UniqueViolation(_) => true,
            DatabaseError::SqlxError(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}

impl DatabaseError {
    /// 把sqlx的唯一约束错误转换为 [`DatabaseError::UniqueViolation`]，其他错误原样包装
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::UniqueViolation(db_err.constraint().unwrap_or_else(|| db_err.message()).to_string())
            }
            _ => Self::SqlxError(err),
        }
    }
}
