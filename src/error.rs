//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// 缺少令牌或令牌无法解码
    #[error("Not authenticated")]
    Unauthenticated,

    /// 用户名不存在或密码错误
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access denied: {0}")]
    Forbidden(&'static str),

    /// 管理员对自己执行封禁或权限变更
    #[error("Invalid operation: {0}")]
    InvalidOperation(&'static str),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InvalidOperation(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UsernameTaken => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthenticated => "Not authenticated".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Forbidden(detail)
            | AppError::InvalidOperation(detail)
            | AppError::NotFound(detail) => (*detail).to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::UsernameTaken => "Username already taken".to_string(),
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

/// 错误响应 DTO
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.code(), message = %self, "Application error");
        } else {
            tracing::debug!(code = self.code(), message = %self, "Request rejected");
        }

        let body = ErrorResponse {
            detail: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// 表单解析失败（缺字段、类型不对、Content-Type 错误）按校验错误处理
impl From<FormRejection> for AppError {
    fn from(e: FormRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Unauthenticated.code(), 401);
        assert_eq!(AppError::InvalidCredentials.code(), 401);
        assert_eq!(AppError::Forbidden("User is blocked").code(), 403);
        assert_eq!(AppError::InvalidOperation("You cannot block yourself").code(), 400);
        assert_eq!(AppError::Validation("bad".to_string()).code(), 400);
        assert_eq!(AppError::NotFound("User not found").code(), 404);
        assert_eq!(AppError::UsernameTaken.code(), 409);
        assert_eq!(AppError::Internal("boom".to_string()).code(), 500);
    }

    #[test]
    fn test_user_message_no_sensitive_info() {
        let error = AppError::Database(sqlx::Error::RowNotFound);
        let message = error.user_message();
        assert_eq!(message, "Database error occurred");
        assert!(!message.contains("sqlx"));

        let error = AppError::Internal("argon2 params rejected".to_string());
        assert_eq!(error.user_message(), "Internal server error");
    }

    #[test]
    fn test_detail_is_passed_through() {
        assert_eq!(AppError::Forbidden("Admins only").user_message(), "Admins only");
        assert_eq!(
            AppError::NotFound("Offer not found").user_message(),
            "Offer not found"
        );
    }
}
