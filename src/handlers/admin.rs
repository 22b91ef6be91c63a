//! 管理面板的 HTTP 处理器

use crate::{
    auth::guards::AdminUser, error::AppError, handlers::found, middleware::AppState, views,
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// 用户列表
pub async fn admin_panel(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.admin_service.list_users().await?;

    Ok(views::admin(&admin, &users))
}

/// 封禁 / 解封
pub async fn block_user(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i64>,
) -> Result<Response, AppError> {
    state.admin_service.toggle_block(&admin, user_id).await?;

    Ok(found("/admin"))
}

/// 授予 / 撤销管理员权限
pub async fn toggle_admin(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i64>,
) -> Result<Response, AppError> {
    state.admin_service.toggle_admin(&admin, user_id).await?;

    Ok(found("/admin"))
}
