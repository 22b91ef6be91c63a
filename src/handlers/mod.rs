//! HTTP 处理器模块

pub mod admin;
pub mod auth;
pub mod health;
pub mod pages;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// 302 重定向（表单提交后跳转）
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
