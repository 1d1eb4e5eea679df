use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Lower bound for the per-request timeout, in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 10;
/// Upper bound for the per-request timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto, e.g. `http://localhost:8082/api`.
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the durable session file. `None` resolves to `$HOME/.config/lms/console`.
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Backend credential pair used after a successful second-factor check.
    pub super_admin_email: String,
    pub super_admin_password: String,
    /// Token stored when a successful login response carries none.
    pub fallback_token: String,
    pub super_admin_fallback_token: String,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS))
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    /// Development defaults pointed at an explicit backend, used by tests and embedders.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.api.base_url = base_url.into();
        config
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("LMS_API_BASE_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("LMS_API_TIMEOUT_SECS") {
            self.api.timeout_secs = v
                .parse::<u64>()
                .map(|secs| secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS))
                .unwrap_or(self.api.timeout_secs);
        }
        if let Ok(v) = env::var("LMS_CONFIG_DIR") {
            self.storage.config_dir = Some(PathBuf::from(v));
        }
        if let Ok(v) = env::var("LMS_SUPER_ADMIN_EMAIL") {
            self.security.super_admin_email = v;
        }
        if let Ok(v) = env::var("LMS_SUPER_ADMIN_PASSWORD") {
            self.security.super_admin_password = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8082/api".to_string(),
                timeout_secs: MIN_TIMEOUT_SECS,
            },
            storage: StorageConfig { config_dir: None },
            security: SecurityConfig::demo(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.lms.example.com/api".to_string(),
                timeout_secs: MAX_TIMEOUT_SECS,
            },
            storage: StorageConfig { config_dir: None },
            security: SecurityConfig::demo(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://lms.example.com/api".to_string(),
                timeout_secs: MAX_TIMEOUT_SECS,
            },
            storage: StorageConfig { config_dir: None },
            security: SecurityConfig::demo(),
        }
    }
}

impl SecurityConfig {
    fn demo() -> Self {
        Self {
            super_admin_email: "superadmin@lms.com".to_string(),
            super_admin_password: "password".to_string(),
            fallback_token: "demo_token".to_string(),
            super_admin_fallback_token: "super_admin_token".to_string(),
        }
    }
}

// Process-wide config for the `lms` binary. Library types take their config explicitly.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
