//! # 错误类型定义

use axum::http::StatusCode;
use thiserror::Error;

use super::ErrorCategory;

/// 应用主要错误类型
#[derive(Debug, Error)]
pub enum AdminError {
    /// 配置相关错误
    #[error("配置错误: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 存储不可达或操作超时
    #[error("连接错误: {message}")]
    Connectivity {
        message: String,
        retryable: bool,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 数据库相关错误
    #[error("数据库错误: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 资源未找到
    #[error("{resource} 未找到: {identifier}")]
    NotFound {
        resource: String,
        identifier: String,
    },

    /// 唯一性冲突
    #[error("{resource} 的 {field} 已存在: {value}")]
    Conflict {
        resource: String,
        field: String,
        value: String,
    },

    /// 输入校验失败
    #[error("校验失败: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// 系统内部错误
    #[error("内部错误: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 序列化/反序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// IO相关错误
    #[error("IO错误: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// 附加了上下文的错误
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<AdminError>,
    },
}

impl AdminError {
    /// 将错误转换为HTTP状态码和错误代码
    #[must_use]
    pub fn to_http_response_parts(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND"),
            Self::Conflict { .. } => (StatusCode::BAD_REQUEST, "RESOURCE_CONFLICT"),
            Self::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::Connectivity {
                retryable: true, ..
            } => (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_UNAVAILABLE"),
            Self::Connectivity { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            Self::Config { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            Self::Database { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Serialization { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR")
            }
            Self::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            Self::Context { source, .. } => source.to_http_response_parts(),
        }
    }

    /// 错误归属
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        if self.to_http_response_parts().0.is_client_error() {
            ErrorCategory::Client
        } else {
            ErrorCategory::Server
        }
    }

    /// 去掉上下文包装后的根错误
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// 是否可由调用方重试
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.root(),
            Self::Connectivity {
                retryable: true,
                ..
            }
        )
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound { .. })
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self.root(), Self::Conflict { .. })
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self.root(), Self::Validation { .. })
    }

    /// 创建配置错误
    pub fn config<T: Into<String>>(message: T) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带源错误的配置错误
    pub fn config_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建连接错误
    pub fn connectivity<T: Into<String>>(message: T, retryable: bool) -> Self {
        Self::Connectivity {
            message: message.into(),
            retryable,
            source: None,
        }
    }

    /// 创建带源错误的连接错误
    pub fn connectivity_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        retryable: bool,
        source: E,
    ) -> Self {
        Self::Connectivity {
            message: message.into(),
            retryable,
            source: Some(source.into()),
        }
    }

    /// 存储操作超时，可重试
    pub fn timeout<T: Into<String>>(operation: T, timeout_ms: u64) -> Self {
        Self::connectivity(
            format!("{} 超时 ({timeout_ms}ms)", operation.into()),
            true,
        )
    }

    /// 创建数据库错误
    pub fn database<T: Into<String>>(message: T) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带源错误的数据库错误
    pub fn database_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, identifier: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            identifier: identifier.into(),
        }
    }

    pub fn conflict<R: Into<String>, F: Into<String>, V: Into<String>>(
        resource: R,
        field: F,
        value: V,
    ) -> Self {
        Self::Conflict {
            resource: resource.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn validation<T: Into<String>>(message: T, field: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }

    /// 创建内部错误
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带源错误的内部错误
    pub fn internal_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn serialization<T: Into<String>, E: Into<anyhow::Error>>(message: T, source: E) -> Self {
        Self::Serialization {
            message: message.into(),
            source: source.into(),
        }
    }

    /// 将 Sea-ORM 错误按资源归类
    ///
    /// 唯一约束冲突转为 `Conflict`，连接类错误转为可重试的 `Connectivity`。
    pub fn from_db_err(resource: &str, err: sea_orm::DbErr) -> Self {
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return Self::conflict(resource, "unique", detail);
        }
        match err {
            sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_) => {
                Self::connectivity_with_source("数据库连接失败", true, err)
            }
            other => Self::database_with_source(format!("{resource} 操作失败"), other),
        }
    }

    /// 将 MongoDB 错误按资源归类
    pub fn from_mongo_err(resource: &str, err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        if err.to_string().contains("E11000") {
            return Self::conflict(resource, "unique", duplicate_key_detail(&err.to_string()));
        }
        match err.kind.as_ref() {
            ErrorKind::Io(_)
            | ErrorKind::ServerSelection { .. }
            | ErrorKind::ConnectionPoolCleared { .. } => {
                Self::connectivity_with_source("MongoDB 连接失败", true, err)
            }
            _ => Self::database_with_source(format!("{resource} 操作失败"), err),
        }
    }
}

/// 从 E11000 消息中截取 `dup key: {...}` 部分
fn duplicate_key_detail(message: &str) -> String {
    message
        .find("dup key:")
        .map_or_else(|| message.to_string(), |pos| message[pos..].trim().to_string())
}

// 自动转换常见错误类型
impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: "文件操作失败".to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for AdminError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML解析失败", err)
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON处理失败", err)
    }
}

impl From<mongodb::bson::ser::Error> for AdminError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::serialization("BSON编码失败", err)
    }
}

impl From<mongodb::bson::de::Error> for AdminError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        Self::serialization("BSON解码失败", err)
    }
}

impl From<sea_orm::DbErr> for AdminError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::from_db_err("record", err)
    }
}

impl From<mongodb::error::Error> for AdminError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::from_mongo_err("record", err)
    }
}

impl From<bcrypt::BcryptError> for AdminError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::internal_with_source("密码处理失败", err)
    }
}
