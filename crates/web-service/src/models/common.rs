use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 封装符合json-api的单个返回对象
///
/// 具体参考：<https://jsonapi.org>
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct Reply<T> {
    pub data: T,
}

/// 封装符合json-api的分页列表对象
///
/// `page_index` 和 `page_size` 为规整之后实际使用的分页参数
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ReplyPage<T> {
    pub data: Vec<T>,

    #[schema(example = 1)]
    /// 当前页数，从1开始
    pub page_index: u32,

    #[schema(example = 20)]
    /// 每页大小
    pub page_size: u32,
}
