//! User domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}

/// Registration form (`application/x-www-form-urlencoded`)
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 64, message = "username must be 1 to 64 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 256, message = "password must be 1 to 256 characters"))]
    pub password: String,
}

/// Login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_form_validation() {
        let ok = RegisterForm {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty_name = RegisterForm {
            username: String::new(),
            password: "secret".to_string(),
        };
        assert!(empty_name.validate().is_err());

        let long_name = RegisterForm {
            username: "a".repeat(65),
            password: "secret".to_string(),
        };
        assert!(long_name.validate().is_err());

        let empty_password = RegisterForm {
            username: "alice".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            is_admin: true,
            is_blocked: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }
}
