//! 项目字段校验
//!
//! 基于 [`validator`] 的声明式规则，把 [`ValidationErrors`] 展开成扁平的 [`FieldError`] 列表。

use crate::models::err::FieldError;
use crate::models::projects::NewProject;
use validator::{Validate, ValidationErrors};

/// 校验新建项目参数，返回全部字段错误
///
/// 返回空列表表示校验通过。结果按字段名排序，同一字段的多个错误保持声明顺序。
pub fn validate_project(project: &NewProject) -> Vec<FieldError> {
    match project.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => flatten(&errors),
    }
}

fn flatten(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid ({})", err.code));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect()
}
