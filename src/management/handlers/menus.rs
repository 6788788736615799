//! # 菜单管理处理器

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::{deleted, found, paged};
use crate::app::AppState;
use crate::error::Result;
use crate::management::pagination::PageQuery;
use crate::management::response;
use crate::models::{CreateMenu, Menu, UpdateMenu};
use crate::repository::Filter;

#[derive(Debug, Default, Deserialize)]
pub struct MenuFilterQuery {
    pub parent_id: Option<String>,
    pub is_active: Option<bool>,
}

pub async fn list_menus(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(query): Query<MenuFilterQuery>,
) -> Result<Response> {
    let mut filter = Filter::new();
    if let Some(parent_id) = &query.parent_id {
        filter = filter.eq("parent_id", parent_id);
    }
    if let Some(is_active) = query.is_active {
        filter = filter.eq("is_active", is_active);
    }
    paged::<Menu, _, _>(&state.services.menus, page, &filter, |m: Menu| m).await
}

pub async fn get_menu(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let menu = found(state.services.menus.get(&id).await?, "menu", &id)?;
    Ok(response::success(menu))
}

pub async fn create_menu(
    State(state): State<AppState>,
    Json(data): Json<CreateMenu>,
) -> Result<Response> {
    Ok(response::created(state.services.menus.create(data).await?))
}

pub async fn update_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateMenu>,
) -> Result<Response> {
    let menu = found(state.services.menus.update(&id, data).await?, "menu", &id)?;
    Ok(response::success(menu))
}

pub async fn delete_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    deleted(state.services.menus.delete(&id).await?, "menu", &id)
}

/// 根菜单
pub async fn root_menus(State(state): State<AppState>) -> Result<Response> {
    Ok(response::success(state.services.menus.get_root_menus().await?))
}

/// 完整菜单树
pub async fn menu_tree(State(state): State<AppState>) -> Result<Response> {
    Ok(response::success(state.services.menus.get_tree().await?))
}

/// 直接子菜单
pub async fn menu_children(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    Ok(response::success(
        state.services.menus.get_by_parent_id(&id).await?,
    ))
}

/// 角色可访问的菜单
pub async fn menus_by_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> Result<Response> {
    Ok(response::success(
        state.services.menus.get_menus_by_role(&role_id).await?,
    ))
}
