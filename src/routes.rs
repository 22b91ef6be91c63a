//! 路由注册
//! 创建所有路由并应用中间件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, limit::RequestBodyLimitLayer};

use crate::{auth::session::session_middleware, handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // 页面路由，会话在进入 handler 前解析一次
    let site_routes = Router::new()
        .route("/", get(handlers::pages::index))
        .route("/offer/{id}", get(handlers::pages::offer))
        .route(
            "/register",
            get(handlers::auth::register_page).post(handlers::auth::register),
        )
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/logout", get(handlers::auth::logout))
        .route("/admin", get(handlers::admin::admin_panel))
        .route("/admin/block/{user_id}", post(handlers::admin::block_user))
        .route("/admin/make_admin/{user_id}", post(handlers::admin::toggle_admin))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(site_routes)
        .layer(RequestBodyLimitLayer::new(state.config.server.max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
