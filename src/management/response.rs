//! # API 响应结构
//!
//! 定义了标准的 JSON API 响应格式，包括成功、失败和分页响应。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::{AdminError, ErrorCategory};

const GENERIC_INTERNAL_MESSAGE: &str = "服务器内部错误";

/// 服务端错误的原始信息，随响应扩展传递，默认不写入响应体
#[derive(Debug, Clone)]
pub struct InternalErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// # 分页信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

/// # 标准成功响应
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// # 分页成功响应
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// # 标准错误信息
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// # 标准错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorInfo,
    pub timestamp: DateTime<Utc>,
}

/// # API响应枚举
///
/// 统一所有API出口，方便转换为 `axum::response::Response`
#[derive(Debug)]
pub enum ApiResponse<T: Serialize> {
    Success(T),
    Created(T),
    SuccessWithoutData(String),
    Paginated(Vec<T>, Pagination),
    AppError(AdminError),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Success(data) => success_body(StatusCode::OK, Some(data), "操作成功"),
            Self::Created(data) => success_body(StatusCode::CREATED, Some(data), "创建成功"),
            Self::SuccessWithoutData(message) => {
                success_body::<()>(StatusCode::OK, None, &message)
            }
            Self::Paginated(data, pagination) => (
                StatusCode::OK,
                Json(PaginatedResponse {
                    success: true,
                    data,
                    pagination,
                    message: Some("获取成功".to_string()),
                    timestamp: Utc::now(),
                }),
            )
                .into_response(),
            Self::AppError(error) => error.into_response(),
        }
    }
}

fn success_body<T: Serialize>(status: StatusCode, data: Option<T>, message: &str) -> Response {
    (
        status,
        Json(SuccessResponse {
            success: true,
            data,
            message: Some(message.to_string()),
            timestamp: Utc::now(),
        }),
    )
        .into_response()
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, code) = self.to_http_response_parts();

        let (message, detail) = match self.category() {
            ErrorCategory::Client => {
                warn!(code, error = %self, "请求被拒绝");
                (self.to_string(), None)
            }
            ErrorCategory::Server => {
                error!(code, error = ?self, "请求处理失败");
                let detail = InternalErrorDetail {
                    code,
                    message: self.to_string(),
                };
                (GENERIC_INTERNAL_MESSAGE.to_string(), Some(detail))
            }
        };

        let field = match self.root() {
            AdminError::Validation { field, .. } => field.clone(),
            AdminError::Conflict { field, .. } => Some(field.clone()),
            _ => None,
        };

        let body = ErrorResponse {
            success: false,
            error: ErrorInfo {
                code: code.to_string(),
                message,
                field,
            },
            timestamp: Utc::now(),
        };
        let mut response = (status, Json(body)).into_response();
        if let Some(detail) = detail {
            response.extensions_mut().insert(detail);
        }
        response
    }
}

/// 响应中间件：把服务端错误的原始信息写回响应体，仅在配置开启时挂载
pub async fn reveal_internal_errors(response: Response) -> Response {
    let Some(detail) = response.extensions().get::<InternalErrorDetail>().cloned() else {
        return response;
    };
    let body = ErrorResponse {
        success: false,
        error: ErrorInfo {
            code: detail.code.to_string(),
            message: detail.message,
            field: None,
        },
        timestamp: Utc::now(),
    };
    (response.status(), Json(body)).into_response()
}

/// # 便捷函数：成功响应
pub fn success<T: Serialize>(data: T) -> Response {
    ApiResponse::Success(data).into_response()
}

/// # 便捷函数：创建成功响应
pub fn created<T: Serialize>(data: T) -> Response {
    ApiResponse::Created(data).into_response()
}

/// # 便捷函数：无数据体的成功响应
pub fn success_without_data(message: &str) -> Response {
    ApiResponse::<()>::SuccessWithoutData(message.to_string()).into_response()
}

/// # 便捷函数：分页响应
pub fn paginated<T: Serialize>(data: Vec<T>, pagination: Pagination) -> Response {
    ApiResponse::Paginated(data, pagination).into_response()
}
