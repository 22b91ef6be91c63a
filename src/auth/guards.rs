//! Access control guards
//!
//! Extractors that hand handlers an explicit identity, built from the
//! [`Session`] that `session_middleware` resolved for the request.

use crate::{auth::session::Session, error::AppError, models::user::User};
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use std::convert::Infallible;

fn session(parts: &Parts) -> Session {
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .unwrap_or(Session::Anonymous)
}

/// Required mode: 401 without a usable token, 403 for unknown or blocked users
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session(parts).required().map(CurrentUser)
    }
}

/// Optional mode: anonymous visitors get `None`
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(session(parts).optional()))
    }
}

/// Pages that need a signed-in visitor: anonymous requests go to the login page
#[derive(Debug, Clone)]
pub struct SignedInUser(pub User);

/// Rejection of [`SignedInUser`]
#[derive(Debug)]
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        crate::handlers::found("/login")
    }
}

impl<S> FromRequestParts<S> for SignedInUser
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session(parts).optional().map(SignedInUser).ok_or(LoginRedirect)
    }
}

/// Required mode plus the admin flag
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_admin {
            tracing::debug!(user_id = user.id, "Non-admin refused on admin route");
            return Err(AppError::Forbidden("Admins only"));
        }

        Ok(AdminUser(user))
    }
}

/// Admins may not change their own block or admin state
pub fn ensure_not_self(actor: &User, target_id: i64, detail: &'static str) -> Result<(), AppError> {
    if actor.id == target_id {
        return Err(AppError::InvalidOperation(detail));
    }

    Ok(())
}
