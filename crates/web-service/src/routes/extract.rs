//! 自定义提取器
//!
//! 包装axum自带的 [`axum::Json`] / [`axum::extract::Query`]，
//! 解析失败时返回 [`AppError`]，保证错误返回体始终是统一的JSON格式。

use crate::models::err::AppError;
use axum::extract::{FromRequest, FromRequestParts};

/// 请求体JSON提取器
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// 查询参数提取器
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
