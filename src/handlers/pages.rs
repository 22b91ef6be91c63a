//! 目录页面处理器

use crate::{
    auth::guards::{MaybeUser, SignedInUser},
    error::AppError,
    middleware::AppState,
    views,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

/// 首页，登录用户看到个性化导航
pub async fn index(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
) -> impl IntoResponse {
    let offers = state.catalog.list();
    views::index(user.as_ref(), &offers)
}

/// 产品详情，匿名访问跳转到登录页
pub async fn offer(
    State(state): State<Arc<AppState>>,
    SignedInUser(user): SignedInUser,
    Path(offer_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let offer = state
        .catalog
        .get(offer_id)
        .ok_or(AppError::NotFound("Offer not found"))?;

    Ok(views::offer(&user, &offer))
}
