//! # 用户管理处理器
//!
//! 响应中永不包含密码哈希。

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deleted, found, paged};
use crate::app::AppState;
use crate::error::Result;
use crate::management::pagination::PageQuery;
use crate::management::response;
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::Filter;

/// 用户列表过滤
#[derive(Debug, Default, Deserialize)]
pub struct UserFilterQuery {
    pub is_active: Option<bool>,
    pub role: Option<String>,
}

/// 对外的用户视图
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub language: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub last_ip_address: Option<String>,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar: user.avatar,
            language: user.language,
            is_active: user.is_active,
            last_login: user.last_login,
            last_ip_address: user.last_ip_address,
            password_changed_at: user.password_changed_at,
            roles: user.roles.0,
            created_at: user.created_at,
            updated_at: user.updated_at,
            created_by: user.created_by,
            updated_by: user.updated_by,
        }
    }
}

/// 列出用户
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(query): Query<UserFilterQuery>,
) -> Result<Response> {
    let mut filter = Filter::new();
    if let Some(is_active) = query.is_active {
        filter = filter.eq("is_active", is_active);
    }

    let users = &state.services.users;
    match query.role {
        // 角色存于数组字段，按角色过滤在内存中进行
        Some(role) => {
            let matched: Vec<UserView> = users
                .find_many(&filter)
                .await?
                .into_iter()
                .filter(|u| u.roles.contains(&role))
                .map(UserView::from)
                .collect();
            let params = page.params();
            let total = matched.len() as u64;
            let items = matched
                .into_iter()
                .skip(usize::try_from(params.offset()).unwrap_or(usize::MAX))
                .take(usize::try_from(params.limit).unwrap_or(usize::MAX))
                .collect();
            Ok(response::paginated(
                items,
                crate::management::pagination::build_page(total, params).into(),
            ))
        }
        None => paged::<User, _, _>(users, page, &filter, UserView::from).await,
    }
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let user = found(state.services.users.get(&id).await?, "user", &id)?;
    Ok(response::success(UserView::from(user)))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(data): Json<CreateUser>,
) -> Result<Response> {
    let user = state.services.users.create(data).await?;
    Ok(response::created(UserView::from(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateUser>,
) -> Result<Response> {
    let user = found(state.services.users.update(&id, data).await?, "user", &id)?;
    Ok(response::success(UserView::from(user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    deleted(state.services.users.delete(&id).await?, "user", &id)
}

pub async fn add_user_role(
    State(state): State<AppState>,
    Path((id, role)): Path<(String, String)>,
) -> Result<Response> {
    let user = state.services.users.add_role(&id, &role).await?;
    Ok(response::success(UserView::from(user)))
}

pub async fn remove_user_role(
    State(state): State<AppState>,
    Path((id, role)): Path<(String, String)>,
) -> Result<Response> {
    let user = state.services.users.remove_role(&id, &role).await?;
    Ok(response::success(UserView::from(user)))
}
