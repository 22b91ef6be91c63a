//! 认证服务：注册、登录

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher},
    error::AppError,
    models::user::{LoginForm, RegisterForm, User},
    repository::UserRepository,
};
use std::sync::Arc;
use validator::Validate;

/// 用户名不存在时参与比对的哈希，使两条分支耗时一致
const DUMMY_PASSWORD: &str = "travel-portal-unknown-user";

pub struct AuthService {
    users: UserRepository,
    hasher: PasswordHasher,
    jwt_service: Arc<JwtService>,
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        users: UserRepository,
        hasher: PasswordHasher,
        jwt_service: Arc<JwtService>,
    ) -> Result<Self, AppError> {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD)?;

        Ok(Self {
            users,
            hasher,
            jwt_service,
            dummy_hash,
        })
    }

    /// 用户注册
    ///
    /// 第一个注册的用户自动成为管理员
    pub async fn register(&self, form: RegisterForm) -> Result<User, AppError> {
        form.validate()?;

        if self.users.find_by_username(&form.username).await?.is_some() {
            tracing::debug!(username = %form.username, "Registration refused: username taken");
            return Err(AppError::UsernameTaken);
        }

        let hasher = self.hasher.clone();
        let password = form.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))??;

        let user = self.users.create(&form.username, &password_hash).await?;

        tracing::info!(
            user_id = user.id,
            username = %user.username,
            is_admin = user.is_admin,
            "User registered"
        );

        Ok(user)
    }

    /// 用户登录，成功时返回访问令牌
    pub async fn login(&self, form: LoginForm) -> Result<String, AppError> {
        let user = self.users.find_by_username(&form.username).await?;

        // 未知用户同样执行一次完整的 Argon2 校验
        let stored_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.clone(),
        };

        let hasher = self.hasher.clone();
        let password = form.password;
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?;

        let user = match user {
            Some(user) if matches => user,
            Some(user) => {
                tracing::info!(user_id = user.id, "Login failed: wrong password");
                return Err(AppError::InvalidCredentials);
            }
            None => {
                tracing::debug!(username = %form.username, "Login failed: unknown user");
                return Err(AppError::InvalidCredentials);
            }
        };

        // 密码正确但账户被封禁
        if user.is_blocked {
            tracing::info!(user_id = user.id, "Login refused: user is blocked");
            return Err(AppError::Forbidden("User is blocked"));
        }

        let token = self.jwt_service.issue(&user.username)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(token)
    }
}
