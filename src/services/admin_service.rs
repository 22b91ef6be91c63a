//! 管理服务：用户列表、封禁与管理员权限切换

use crate::{
    auth::guards::ensure_not_self, error::AppError, models::user::User,
    repository::UserRepository,
};

pub struct AdminService {
    users: UserRepository,
}

impl AdminService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// 列出所有用户
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    /// 切换目标用户的封禁状态
    pub async fn toggle_block(&self, actor: &User, target_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(target_id)
            .await?
            .ok_or(AppError::NotFound("User not found"))?;

        ensure_not_self(actor, target_id, "You cannot block yourself")?;

        let user = self
            .users
            .toggle_blocked(target_id)
            .await?
            .ok_or(AppError::NotFound("User not found"))?;

        tracing::info!(
            actor_id = actor.id,
            target_id,
            is_blocked = user.is_blocked,
            "Block state toggled"
        );

        Ok(user)
    }

    /// 切换目标用户的管理员权限
    pub async fn toggle_admin(&self, actor: &User, target_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(target_id)
            .await?
            .ok_or(AppError::NotFound("User not found"))?;

        ensure_not_self(actor, target_id, "You cannot change your own admin rights")?;

        let user = self
            .users
            .toggle_admin(target_id)
            .await?
            .ok_or(AppError::NotFound("User not found"))?;

        tracing::info!(
            actor_id = actor.id,
            target_id,
            is_admin = user.is_admin,
            "Admin rights toggled"
        );

        Ok(user)
    }
}
