//! # 错误处理测试

use crate::error::{AdminError, Context, ErrorCategory};
use axum::http::StatusCode;
use std::error::Error;

#[test]
fn test_config_error_creation() {
    let err = AdminError::config("测试配置错误");
    assert!(matches!(err, AdminError::Config { .. }));
    assert_eq!(err.to_string(), "配置错误: 测试配置错误");
}

#[test]
fn test_config_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在");
    let err = AdminError::config_with_source("配置文件加载失败", io_err);

    assert!(err.to_string().contains("配置文件加载失败"));
    assert!(err.source().is_some());
}

#[test]
fn test_http_status_mapping() {
    let cases = [
        (AdminError::not_found("user", "u1"), StatusCode::NOT_FOUND),
        (
            AdminError::conflict("user", "email", "a@b.c"),
            StatusCode::BAD_REQUEST,
        ),
        (
            AdminError::validation("bad", Some("path")),
            StatusCode::BAD_REQUEST,
        ),
        (
            AdminError::timeout("find_many users", 100),
            StatusCode::SERVICE_UNAVAILABLE,
        ),
        (
            AdminError::connectivity("down", false),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (AdminError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, status) in cases {
        assert_eq!(err.to_http_response_parts().0, status, "{err}");
    }
}

#[test]
fn test_conflict_message_names_field() {
    let err = AdminError::conflict("user", "email", "a@example.com");
    assert!(err.to_string().contains("email"));
    assert!(err.is_conflict());
    assert_eq!(err.category(), ErrorCategory::Client);
}

#[test]
fn test_context_preserves_status() {
    let result: Result<(), AdminError> = Err(AdminError::not_found("menu", "m1"));
    let err = result.context("加载父菜单").unwrap_err();

    assert!(matches!(err, AdminError::Context { .. }));
    assert!(err.is_not_found());
    assert_eq!(err.to_http_response_parts().0, StatusCode::NOT_FOUND);
    assert!(err.to_string().starts_with("加载父菜单"));
}

#[test]
fn test_timeout_is_retryable() {
    let err = AdminError::timeout("count roles", 250);
    assert!(err.is_retryable());
    assert!(err.to_string().contains("250ms"));
    assert!(!AdminError::database("x").is_retryable());
}

#[test]
fn test_auto_conversion_from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在");
    let err: AdminError = io_err.into();
    assert!(matches!(err, AdminError::Io { .. }));
}

#[test]
fn test_auto_conversion_from_toml_error() {
    let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
    let err: AdminError = toml_err.into();
    assert!(matches!(err, AdminError::Config { .. }));
    assert!(err.to_string().contains("TOML解析失败"));
}

#[test]
fn test_db_connection_error_is_connectivity() {
    let err = AdminError::from_db_err(
        "users",
        sea_orm::DbErr::Conn(sea_orm::RuntimeErr::Internal("refused".to_string())),
    );
    assert!(err.is_retryable());
}

#[test]
fn test_db_custom_error_is_database() {
    let err = AdminError::from_db_err("users", sea_orm::DbErr::Custom("bad".to_string()));
    assert!(matches!(err, AdminError::Database { .. }));
    assert_eq!(err.category(), ErrorCategory::Server);
}

#[test]
fn test_ensure_validation_macro() {
    fn check(value: i32) -> crate::error::Result<i32> {
        crate::ensure_validation!(value > 0, "value", "必须为正数: {}", value);
        Ok(value)
    }
    assert_eq!(check(3).unwrap(), 3);
    let err = check(-1).unwrap_err();
    assert!(matches!(
        err,
        AdminError::Validation { field: Some(ref f), .. } if f == "value"
    ));
}
