//! User repository (数据库访问层)

use crate::{error::AppError, models::user::User};
use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct UserRepository {
    db: SqlitePool,
}

impl UserRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// 根据用户名查找用户
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// 根据 ID 查找用户
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// 创建用户
    ///
    /// 表为空时新用户自动成为管理员，判断与插入在同一条语句内完成
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, is_admin, is_blocked, created_at)
            VALUES (?, ?, (SELECT COUNT(*) = 0 FROM users), FALSE, ?)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::UsernameTaken
            }
            other => AppError::Database(other),
        })?;

        Ok(user)
    }

    /// 切换封禁状态，返回更新后的用户
    pub async fn toggle_blocked(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET is_blocked = NOT is_blocked WHERE id = ? RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// 切换管理员权限，返回更新后的用户
    pub async fn toggle_admin(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET is_admin = NOT is_admin WHERE id = ? RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// 列出所有用户
    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.db)
            .await?;

        Ok(users)
    }
}
