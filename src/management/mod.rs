//! # 管理API模块
//!
//! 提供RESTful API接口用于用户、角色、权限、菜单与设置的管理

pub mod handlers;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod server;

pub use routes::create_routes;
pub use server::{ManagementServer, create_router};
