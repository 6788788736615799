//! # 路由配置
//!
//! 定义所有API路由和路由组织

use axum::Router;
use axum::routing::{get, post};

use super::handlers::{menus, permissions, roles, settings, system, users};
use crate::app::AppState;

/// 创建所有路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/users", user_routes())
        .nest("/roles", role_routes())
        .nest("/permissions", permission_routes())
        .nest("/menus", menu_routes())
        .nest("/settings", setting_routes())
        .route("/application-info", get(system::application_info))
        .with_state(state)
}

/// 健康检查路由
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(system::health_check))
        .route("/db", get(system::database_health))
}

/// 用户管理路由
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/{id}/roles/{role}",
            post(users::add_user_role).delete(users::remove_user_role),
        )
}

/// 角色管理路由
fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(roles::list_roles).post(roles::create_role))
        .route(
            "/{id}",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
}

/// 权限管理路由
fn permission_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(permissions::list_permissions).post(permissions::create_permission),
        )
        .route(
            "/{id}",
            get(permissions::get_permission)
                .put(permissions::update_permission)
                .delete(permissions::delete_permission),
        )
}

/// 菜单管理路由
fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menus::list_menus).post(menus::create_menu))
        .route("/roots", get(menus::root_menus))
        .route("/tree", get(menus::menu_tree))
        .route("/role/{role_id}", get(menus::menus_by_role))
        .route(
            "/{id}",
            get(menus::get_menu)
                .put(menus::update_menu)
                .delete(menus::delete_menu),
        )
        .route("/{id}/children", get(menus::menu_children))
}

/// 系统设置路由
fn setting_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::list_settings).post(settings::create_setting))
        .route("/public", get(settings::public_settings))
        .route(
            "/{id}",
            get(settings::get_setting)
                .put(settings::update_setting)
                .delete(settings::delete_setting),
        )
}
