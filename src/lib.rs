//! # Admin Hub Library
//!
//! 管理后台核心库：用户、角色、权限、菜单与系统设置，
//! 存储可在关系型（SQLite / PostgreSQL）与文档型（MongoDB）之间切换。

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod management;
pub mod models;
pub mod repository;
pub mod services;
pub mod storage;
pub mod testing;

pub use app::{AppContext, AppState};
pub use config::AppConfig;
pub use error::{AdminError, Result};
