//! HTTP 中间件与应用状态
//! 请求追踪、服务装配

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher, session::SessionResolver},
    catalog::{OfferCatalog, StaticCatalog},
    config::AppConfig,
    error::AppError,
    repository::UserRepository,
    services::{AdminService, AuthService},
};
use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// 应用状态
///
/// 服务使用 Arc 包装，多个请求共享同一实例，Clone 成本低廉
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: SqlitePool,
    pub auth_service: Arc<AuthService>,
    pub admin_service: Arc<AdminService>,
    pub sessions: Arc<SessionResolver>,
    /// 只读的旅游产品目录
    pub catalog: Arc<dyn OfferCatalog>,
}

impl AppState {
    /// 按配置装配所有服务，目录来源由 `catalog.path` 决定
    pub fn new(config: AppConfig, db: SqlitePool) -> Result<Arc<Self>, AppError> {
        let catalog: Arc<dyn OfferCatalog> = match &config.catalog.path {
            Some(path) => Arc::new(StaticCatalog::from_json_file(path)?),
            None => Arc::new(StaticCatalog::builtin()),
        };

        Self::with_catalog(config, db, catalog)
    }

    pub fn with_catalog(
        config: AppConfig,
        db: SqlitePool,
        catalog: Arc<dyn OfferCatalog>,
    ) -> Result<Arc<Self>, AppError> {
        let jwt_service = Arc::new(JwtService::from_config(&config.security)?);
        let hasher = PasswordHasher::from_config(&config.security)?;
        let users = UserRepository::new(db.clone());

        Ok(Arc::new(Self {
            auth_service: Arc::new(AuthService::new(users.clone(), hasher, jwt_service.clone())?),
            admin_service: Arc::new(AdminService::new(users.clone())),
            sessions: Arc::new(SessionResolver::new(users, jwt_service)),
            catalog,
            config,
            db,
        }))
    }
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let mut response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        // 指标标签只使用有限取值
        let method_name = match method.as_str() {
            "GET" => "GET",
            "POST" => "POST",
            _ => "OTHER",
        };
        let status_class = match status {
            200..=299 => "2xx",
            300..=399 => "3xx",
            400..=499 => "4xx",
            _ => "5xx",
        };

        metrics::counter!("http_requests_total", "method" => method_name, "status" => status_class)
            .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            uri = %uri,
            status = status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Request completed"
        );

        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_or_generate_trace_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-trace-id", "test-trace-123".parse().unwrap());

        let trace_id = extract_or_generate_trace_id(&headers);
        assert_eq!(trace_id, "test-trace-123");

        let headers = HeaderMap::new();
        let trace_id = extract_or_generate_trace_id(&headers);
        assert!(!trace_id.is_empty());
        assert_ne!(trace_id, "test-trace-123");
    }
}
