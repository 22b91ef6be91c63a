//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// 开发环境默认 JWT 密钥，生产环境必须覆盖
pub const DEFAULT_JWT_SECRET: &str = "change-this-secret-in-production-min-32-chars!";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:3000"
    pub addr: String,
    /// 请求体大小上限（字节）
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库连接 URL（使用 Secret 包装，防止日志泄露）
    pub url: Secret<String>,
    /// 最大连接数
    pub max_connections: u32,
    /// 最小连接数
    pub min_connections: u32,
    /// 获取连接超时时间（秒）
    pub acquire_timeout_secs: u64,
    /// 空闲连接超时时间（秒）
    pub idle_timeout_secs: u64,
    /// 连接最大生命周期（秒）
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// JWT 密钥（使用 Secret 包装，防止日志泄露）
    pub jwt_secret: Secret<String>,
    /// 访问令牌过期时间（秒）
    pub access_token_exp_secs: u64,
    /// Cookie 是否带 Secure 标记（仅 HTTPS 部署时开启）
    pub cookie_secure: bool,
    /// Argon2 内存开销（KiB）
    pub argon2_memory_kib: u32,
    /// Argon2 迭代次数
    pub argon2_iterations: u32,
    /// Argon2 并行度
    pub argon2_parallelism: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// 目录 JSON 文件路径，未设置时使用内置目录
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("server.addr", "0.0.0.0:3000")?
            .set_default("server.max_body_bytes", 64 * 1024)?
            .set_default("database.url", "sqlite://travel_portal.db")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("database.max_lifetime_secs", 1800)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("security.jwt_secret", DEFAULT_JWT_SECRET)?
            .set_default("security.access_token_exp_secs", 1800)?
            .set_default("security.cookie_secure", false)?
            .set_default("security.argon2_memory_kib", 65536)?
            .set_default("security.argon2_iterations", 3)?
            .set_default("security.argon2_parallelism", 4)?;

        // 从环境变量加载配置（前缀为 TRAVEL_）
        settings = settings.add_source(
            Environment::with_prefix("TRAVEL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 是否仍在使用开发默认密钥
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.security.jwt_secret.expose_secret() == DEFAULT_JWT_SECRET
    }

    /// 验证配置合法性
    fn validate(&self) -> Result<(), ConfigError> {
        // 验证端口范围
        if let Some(port_str) = self.server.addr.split(':').next_back() {
            if let Ok(port) = port_str.parse::<u16>() {
                if port < 1024 {
                    return Err(ConfigError::Message("Server port should be >= 1024".to_string()));
                }
            }
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        if self.database.max_connections < self.database.min_connections {
            return Err(ConfigError::Message(
                "max_connections must be >= min_connections".to_string(),
            ));
        }

        // HS256 密钥至少 32 字符
        if self.security.jwt_secret.expose_secret().len() < 32 {
            return Err(ConfigError::Message(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        if self.security.access_token_exp_secs < 60 || self.security.access_token_exp_secs > 604800 {
            return Err(ConfigError::Message(
                "access_token_exp_secs must be between 60 and 604800 (1 minute to 7 days)"
                    .to_string(),
            ));
        }

        if self.security.argon2_iterations < 1 || self.security.argon2_parallelism < 1 {
            return Err(ConfigError::Message(
                "argon2_iterations and argon2_parallelism must be >= 1".to_string(),
            ));
        }

        if self.security.argon2_memory_kib < 8 * self.security.argon2_parallelism {
            return Err(ConfigError::Message(
                "argon2_memory_kib must be at least 8 * argon2_parallelism".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        "TRAVEL_DATABASE__URL",
        "TRAVEL_SERVER__ADDR",
        "TRAVEL_LOGGING__LEVEL",
        "TRAVEL_LOGGING__FORMAT",
        "TRAVEL_SECURITY__JWT_SECRET",
        "TRAVEL_SECURITY__ACCESS_TOKEN_EXP_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env();

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server.addr, "0.0.0.0:3000");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.security.access_token_exp_secs, 1800);
        assert!(!config.security.cookie_secure);
        assert!(config.catalog.path.is_none());
        assert!(config.uses_default_jwt_secret());
    }

    #[test]
    #[serial]
    fn test_config_env_override() {
        clear_env();
        std::env::set_var("TRAVEL_SECURITY__JWT_SECRET", "an-overridden-secret-that-is-long-enough");
        std::env::set_var("TRAVEL_SECURITY__ACCESS_TOKEN_EXP_SECS", "120");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.security.access_token_exp_secs, 120);
        assert!(!config.uses_default_jwt_secret());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_validation_invalid_port() {
        clear_env();
        std::env::set_var("TRAVEL_SERVER__ADDR", "0.0.0.0:80");

        let result = AppConfig::from_env();
        assert!(result.is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_validation_invalid_log_level() {
        clear_env();
        std::env::set_var("TRAVEL_LOGGING__LEVEL", "invalid");

        let result = AppConfig::from_env();
        assert!(result.is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_validation_short_secret() {
        clear_env();
        std::env::set_var("TRAVEL_SECURITY__JWT_SECRET", "too-short");

        let result = AppConfig::from_env();
        assert!(result.is_err());

        clear_env();
    }
}
