//! 角色管理处理器

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::{deleted, found, paged};
use crate::app::AppState;
use crate::error::Result;
use crate::management::pagination::PageQuery;
use crate::management::response;
use crate::models::{CreateRole, Role, UpdateRole};
use crate::repository::Filter;

#[derive(Debug, Default, Deserialize)]
pub struct RoleFilterQuery {
    pub is_active: Option<bool>,
}

pub async fn list_roles(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(query): Query<RoleFilterQuery>,
) -> Result<Response> {
    let mut filter = Filter::new();
    if let Some(is_active) = query.is_active {
        filter = filter.eq("is_active", is_active);
    }
    paged::<Role, _, _>(&state.services.roles, page, &filter, |role: Role| role).await
}

pub async fn get_role(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let role = found(state.services.roles.get(&id).await?, "role", &id)?;
    Ok(response::success(role))
}

pub async fn create_role(
    State(state): State<AppState>,
    Json(data): Json<CreateRole>,
) -> Result<Response> {
    Ok(response::created(state.services.roles.create(data).await?))
}

pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateRole>,
) -> Result<Response> {
    let role = found(state.services.roles.update(&id, data).await?, "role", &id)?;
    Ok(response::success(role))
}

/// 删除角色，同时删除其权限
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    deleted(state.services.roles.delete(&id).await?, "role", &id)
}
