//! # 管理API处理器

pub mod menus;
pub mod permissions;
pub mod roles;
pub mod settings;
pub mod system;
pub mod users;

use axum::response::Response;
use serde::Serialize;

use super::pagination::{PageQuery, build_page};
use super::response;
use crate::error::{AdminError, Result};
use crate::repository::{Filter, Record};
use crate::services::EntityService;

/// 按分页参数查询并返回分页响应
pub(super) async fn paged<T, V, F>(
    service: &EntityService<T>,
    page: PageQuery,
    filter: &Filter,
    view: F,
) -> Result<Response>
where
    T: Record,
    V: Serialize,
    F: Fn(T) -> V,
{
    let params = page.params();
    let total = service.count(filter).await?;
    let items = service
        .list(params.offset(), params.limit, filter)
        .await?
        .into_iter()
        .map(view)
        .collect();
    Ok(response::paginated(items, build_page(total, params).into()))
}

/// `None` 转换为 404
pub(super) fn found<T>(value: Option<T>, resource: &str, id: &str) -> Result<T> {
    value.ok_or_else(|| AdminError::not_found(resource, id))
}

/// 删除结果：不存在时返回 404
pub(super) fn deleted(removed: bool, resource: &str, id: &str) -> Result<Response> {
    if removed {
        Ok(response::success_without_data("删除成功"))
    } else {
        Err(AdminError::not_found(resource, id))
    }
}
