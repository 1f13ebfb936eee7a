//! 导航服务错误定义

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// 导航服务错误类型
///
/// back/forward 在空栈上是合法的 no-op，clear 不会失败，
/// 因此唯一的错误来源是非法的 visit 参数。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// 无效的请求参数（空页面标识、缺失字段、无法解析的请求体）
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl NavigationError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl IntoResponse for NavigationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            NavigationError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

/// 导航结果类型别名
pub type NavigationResult<T> = Result<T, NavigationError>;
