//! Session resolution
//! Turns the `token` cookie of a request into zero or one authenticated user

use crate::{
    auth::jwt::JwtService, error::AppError, middleware::AppState, models::user::User,
    repository::UserRepository,
};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Name of the cookie carrying the bearer token
pub const TOKEN_COOKIE: &str = "token";

/// Outcome of resolving a request's credential
#[derive(Debug, Clone)]
pub enum Session {
    Authenticated(User),
    /// No token, or a token that failed to decode
    Anonymous,
    /// Token decoded but its subject is unknown or blocked
    Rejected,
}

impl Session {
    /// Required mode
    pub fn required(self) -> Result<User, AppError> {
        match self {
            Session::Authenticated(user) => Ok(user),
            Session::Anonymous => Err(AppError::Unauthenticated),
            Session::Rejected => Err(AppError::Forbidden("Access denied")),
        }
    }

    /// Optional mode
    pub fn optional(self) -> Option<User> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous | Session::Rejected => None,
        }
    }
}

pub struct SessionResolver {
    users: UserRepository,
    jwt_service: Arc<JwtService>,
}

impl SessionResolver {
    pub fn new(users: UserRepository, jwt_service: Arc<JwtService>) -> Self {
        Self { users, jwt_service }
    }

    /// Decode the token, look up its subject and apply the block check.
    ///
    /// Only storage failures are returned as errors.
    pub async fn resolve(&self, token: Option<&str>) -> Result<Session, AppError> {
        let Some(token) = token else {
            return Ok(Session::Anonymous);
        };

        let claims = match self.jwt_service.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring undecodable session token");
                return Ok(Session::Anonymous);
            }
        };

        match self.users.find_by_username(&claims.sub).await? {
            Some(user) if !user.is_blocked => Ok(Session::Authenticated(user)),
            Some(user) => {
                tracing::info!(user_id = user.id, "Session refused for blocked user");
                Ok(Session::Rejected)
            }
            None => {
                tracing::debug!(subject = %claims.sub, "Session subject no longer exists");
                Ok(Session::Rejected)
            }
        }
    }

    pub async fn resolve_required(&self, token: Option<&str>) -> Result<User, AppError> {
        self.resolve(token).await?.required()
    }

    pub async fn resolve_optional(&self, token: Option<&str>) -> Result<Option<User>, AppError> {
        Ok(self.resolve(token).await?.optional())
    }
}

/// Read the bearer token from the `token` cookie
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(value) = value.to_str() else {
            continue;
        };

        for pair in value.split(';') {
            let Some((key, val)) = pair.trim().split_once('=') else {
                continue;
            };
            let val = val.trim();
            if key.trim() == TOKEN_COOKIE && !val.is_empty() {
                return Some(val.to_string());
            }
        }
    }

    None
}

/// Resolves the session once per request and stores it in the request extensions
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers());
    let session = state.sessions.resolve(token.as_deref()).await?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
