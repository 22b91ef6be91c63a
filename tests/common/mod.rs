//! 测试公共模块
//! 提供测试配置、内存数据库和请求辅助函数

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use secrecy::Secret;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;
use travel_portal::{
    auth::Claims,
    config::{AppConfig, CatalogConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig},
    db,
    middleware::AppState,
};

/// 创建测试配置（内存数据库、低开销 Argon2 参数）
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            max_body_bytes: 16 * 1024,
        },
        database: DatabaseConfig {
            // 内存库只存在于单个连接中
            url: Secret::new("sqlite::memory:".to_string()),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 3600,
            max_lifetime_secs: 3600,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new("test-secret-key-for-testing-only-min-32-chars".to_string()),
            access_token_exp_secs: 300,
            cookie_secure: false,
            argon2_memory_kib: 1024,
            argon2_iterations: 1,
            argon2_parallelism: 1,
        },
        catalog: CatalogConfig::default(),
    }
}

/// 初始化测试数据库
pub async fn setup_test_db(config: &AppConfig) -> SqlitePool {
    let pool = db::create_pool(&config.database)
        .await
        .expect("Failed to create test database pool");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// 创建测试应用状态
pub async fn create_test_app_state() -> Arc<AppState> {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    AppState::new(config, pool).expect("Failed to build app state")
}

/// 创建测试路由
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    let state = create_test_app_state().await;
    let app = travel_portal::routes::create_router(state.clone());
    (app, state)
}

fn form_body(username: &str, password: &str) -> String {
    format!("username={}&password={}", username, password)
}

/// 发送表单 POST
pub async fn post_form(app: &Router, uri: &str, username: &str, password: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form_body(username, password)))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// 发送原始表单正文
pub async fn post_raw(app: &Router, uri: &str, content_type: &str, body: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// 用测试密钥签发一个已过期的令牌
pub fn expired_token(config: &AppConfig, username: &str) -> String {
    use secrecy::ExposeSecret;

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: username.to_string(),
        iat: now - 600,
        exp: now - 300,
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(config.security.jwt_secret.expose_secret().as_bytes()),
    )
    .unwrap()
}

/// 发送请求，可选携带 token cookie
pub async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={}", token));
    }

    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn register(app: &Router, username: &str, password: &str) {
    let response = post_form(app, "/register", username, password).await;
    assert_eq!(response.status(), StatusCode::FOUND, "registering {}", username);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

/// 登录并返回 cookie 中的令牌
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = post_form(app, "/login", username, password).await;
    assert_eq!(response.status(), StatusCode::FOUND, "logging in {}", username);

    token_from_response(&response).expect("login should set the token cookie")
}

pub fn token_from_response(response: &Response<Body>) -> Option<String> {
    let cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let first = cookie.split(';').next()?;
    let value = first.strip_prefix("token=")?;
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
