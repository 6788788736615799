//! 权限管理处理器

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::{deleted, found, paged};
use crate::app::AppState;
use crate::error::Result;
use crate::management::pagination::PageQuery;
use crate::management::response;
use crate::models::{CreatePermission, Permission, UpdatePermission};
use crate::repository::Filter;

#[derive(Debug, Default, Deserialize)]
pub struct PermissionFilterQuery {
    pub function_id: Option<String>,
    pub role_id: Option<String>,
}

pub async fn list_permissions(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(query): Query<PermissionFilterQuery>,
) -> Result<Response> {
    let mut filter = Filter::new();
    if let Some(function_id) = &query.function_id {
        filter = filter.eq("function_id", function_id);
    }
    if let Some(role_id) = &query.role_id {
        filter = filter.eq("role_id", role_id);
    }
    paged::<Permission, _, _>(&state.services.permissions, page, &filter, |p: Permission| p).await
}

pub async fn get_permission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let permission = found(state.services.permissions.get(&id).await?, "permission", &id)?;
    Ok(response::success(permission))
}

pub async fn create_permission(
    State(state): State<AppState>,
    Json(data): Json<CreatePermission>,
) -> Result<Response> {
    Ok(response::created(
        state.services.permissions.create(data).await?,
    ))
}

pub async fn update_permission(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdatePermission>,
) -> Result<Response> {
    let permission = found(
        state.services.permissions.update(&id, data).await?,
        "permission",
        &id,
    )?;
    Ok(response::success(permission))
}

pub async fn delete_permission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    deleted(
        state.services.permissions.delete(&id).await?,
        "permission",
        &id,
    )
}
