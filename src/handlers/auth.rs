//! 认证相关的 HTTP 处理器

use crate::{
    auth::session::TOKEN_COOKIE,
    error::AppError,
    handlers::found,
    middleware::AppState,
    models::user::{LoginForm, RegisterForm},
    views,
};
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Form,
};
use std::sync::Arc;

pub async fn register_page() -> impl IntoResponse {
    views::register()
}

/// 注册后跳转到登录页
pub async fn register(
    State(state): State<Arc<AppState>>,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;
    state.auth_service.register(form).await?;

    Ok(found("/login"))
}

pub async fn login_page() -> impl IntoResponse {
    views::login()
}

/// 登录成功后写入 token cookie 并跳转到首页
pub async fn login(
    State(state): State<Arc<AppState>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;
    let token = state.auth_service.login(form).await?;
    let cookie = session_cookie(&token, state.config.security.cookie_secure)?;

    let mut response = found("/");
    response.headers_mut().insert(header::SET_COOKIE, cookie);

    Ok(response)
}

/// 清除 cookie，令牌本身在过期前依然有效
pub async fn logout(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let cookie = clear_session_cookie(state.config.security.cookie_secure)?;

    let mut response = found("/");
    response.headers_mut().insert(header::SET_COOKIE, cookie);

    Ok(response)
}

fn session_cookie(token: &str, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!("{TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("Invalid cookie value: {}", e)))
}

fn clear_session_cookie(secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!("{TOKEN_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("Invalid cookie value: {}", e)))
}
