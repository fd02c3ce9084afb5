//! 数据库仓库模块
//!
//! 这里定义数据库操作的Repository层

pub mod organization;
pub mod project;
pub mod project_user;
pub mod traits;

// 重新导出具体的类型
pub use organization::OrganizationRepository;
pub use project::ProjectRepository;
pub use project_user::ProjectUserRepository;
pub use traits::{OrganizationRepositoryTrait, ProjectRepositoryTrait, ProjectUserRepositoryTrait};
