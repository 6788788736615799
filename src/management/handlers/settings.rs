//! 系统设置处理器

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::{deleted, found, paged};
use crate::app::AppState;
use crate::error::Result;
use crate::management::pagination::PageQuery;
use crate::management::response;
use crate::models::{CreateSetting, Setting, UpdateSetting};
use crate::repository::Filter;

#[derive(Debug, Default, Deserialize)]
pub struct SettingFilterQuery {
    pub group: Option<String>,
    pub section: Option<String>,
}

pub async fn list_settings(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(query): Query<SettingFilterQuery>,
) -> Result<Response> {
    let mut filter = Filter::new();
    if let Some(group) = &query.group {
        filter = filter.eq("group", group);
    }
    if let Some(section) = &query.section {
        filter = filter.eq("section", section);
    }
    paged::<Setting, _, _>(&state.services.settings, page, &filter, |s: Setting| s).await
}

pub async fn public_settings(State(state): State<AppState>) -> Result<Response> {
    Ok(response::success(
        state.services.settings.get_public_settings().await?,
    ))
}

pub async fn get_setting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let setting = found(state.services.settings.get(&id).await?, "setting", &id)?;
    Ok(response::success(setting))
}

pub async fn create_setting(
    State(state): State<AppState>,
    Json(data): Json<CreateSetting>,
) -> Result<Response> {
    Ok(response::created(state.services.settings.create(data).await?))
}

pub async fn update_setting(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateSetting>,
) -> Result<Response> {
    let setting = found(
        state.services.settings.update(&id, data).await?,
        "setting",
        &id,
    )?;
    Ok(response::success(setting))
}

pub async fn delete_setting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    deleted(state.services.settings.delete(&id).await?, "setting", &id)
}
