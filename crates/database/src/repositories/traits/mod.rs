//! 数据库仓库 trait 定义
//!
//! 这里定义了各种数据库仓库的抽象接口
//!
//! ## Repository Trait 设计模式 🎯
//!
//! 所有 Repository trait 都遵循统一的约束：
//!
//! ```rust,ignore
//! pub trait XxxRepositoryTrait: Send + Sync + 'static {
//!     // 异步方法定义...
//! }
//! ```
//!
//! - `Send` / `Sync`：仓库实例会被多个并发请求共享，异步方法返回的 `Future` 需要跨线程传递
//! - `'static`：仓库作为应用服务长期存在，不依赖短期引用
//!
//! 服务层通过泛型参数持有仓库（Policy Based Design），而不是 trait object：
//!
//! ```rust,ignore
//! pub struct ProjectService<P, O, U, E>
//! where
//!     P: ProjectRepositoryTrait,
//!     O: OrganizationRepositoryTrait,
//!     U: ProjectUserRepositoryTrait,
//!     E: EventSink,
//! {
//!     project_repository: Arc<P>,
//!     ...
//! }
//! ```
//!
//! 测试时可以用内存实现替换真实的数据库仓库。
//!
//! 查询单条记录的方法统一返回 `DatabaseResult<Option<T>>`，找不到记录不是错误。

pub mod organization;
pub mod project;
pub mod project_user;

// 重新导出
pub use organization::OrganizationRepositoryTrait;
pub use project::ProjectRepositoryTrait;
pub use project_user::ProjectUserRepositoryTrait;
