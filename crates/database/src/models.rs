//! 数据库模型模块
//!
//! 这里定义与数据库表对应的结构体和相关操作

pub mod organization;
pub mod project;
pub mod project_user;

// 重新导出具体的模型
pub use organization::Organization;
pub use project::Project;
pub use project_user::ProjectUser;
