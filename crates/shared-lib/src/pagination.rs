//! 分页辅助工具
//!
//! 把用户传入的 page/limit/sort 参数规整为一个合法的 [`PageRequest`]：
//!
//! - page 从1开始，`None` 或 `0` 都会被当做第1页
//! - limit 为空或者为0时使用默认值，超过上限时截断为上限
//! - 排序字段和方向只接受白名单内的值，非法值回退为默认排序
//!
//! 这里的所有函数都不会返回错误，非法输入一律被修正。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 规整页码，最小为1
pub fn normalize_page(page: Option<u32>) -> u32 {
    page.filter(|p| *p > 0).unwrap_or(1)
}

/// 规整每页大小
///
/// - `None` 或 `0` 使用 `default`
/// - 超过 `max` 时截断为 `max`
pub fn normalize_limit(limit: Option<u32>, default: u32, max: u32) -> u32 {
    let max = max.max(1);
    limit.filter(|l| *l > 0).unwrap_or(default).clamp(1, max)
}

/// 可排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Name,
    #[default]
    CreatedAt,
}

impl SortField {
    /// 解析排序字段，无法识别时返回默认的 `created_at`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("id") => SortField::Id,
            Some("name") => SortField::Name,
            Some("created_at") | Some("createdat") => SortField::CreatedAt,
            _ => SortField::default(),
        }
    }

    /// 对应的数据库列名
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::CreatedAt => "created_at",
        }
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// 解析排序方向，无法识别时返回默认的 `desc`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::default(),
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// 规整后的分页查询请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl PageRequest {
    /// 根据已经规整过的 page/limit 以及原始排序参数创建分页请求
    pub fn new(page: u32, limit: u32, sort_by: Option<&str>, sort_dir: Option<&str>) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            sort_field: SortField::parse(sort_by),
            sort_direction: SortDirection::parse(sort_dir),
        }
    }

    /// 查询偏移量
    ///
    /// saturating运算保证页码很大时也不会溢出
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)).saturating_mul(u64::from(self.limit))
    }

    /// 生成 `ORDER BY` 子句
    ///
    /// 只会使用白名单内的列名和方向，可以安全地拼接到SQL中。
    /// 排序字段不是 `id` 时追加 `id` 作为第二排序键，保证分页结果稳定。
    pub fn order_by_clause(&self) -> String {
        let direction = self.sort_direction.keyword();
        match self.sort_field {
            SortField::Id => format!("ORDER BY id {direction}"),
            field => format!("ORDER BY {} {direction}, id {direction}", field.column()),
        }
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page={} limit={} sort={} {}",
            self.page,
            self.limit,
            self.sort_field.column(),
            self.sort_direction.keyword()
        )
    }
}
