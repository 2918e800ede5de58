use std::env;
use std::fmt;

use crate::auth::{CurrentUser, PersistedSession, UserRole};

/// Distinguishes runtime behavior for different stages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub telemetry: TelemetryConfig,
    pub session: Option<PersistedSession>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("HIRELANE_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url = env::var("HIRELANE_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:4000/api".to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidApiUrl { found: base_url });
        }

        let timeout_secs = env::var("HIRELANE_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let log_level = env::var("HIRELANE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let session = Self::load_session()?;

        Ok(Self {
            environment,
            api: ApiConfig {
                base_url,
                timeout_secs,
            },
            telemetry: TelemetryConfig { log_level },
            session,
        })
    }

    /// A session exists only when a token is configured; the token then
    /// requires the user identity alongside it.
    fn load_session() -> Result<Option<PersistedSession>, ConfigError> {
        let token = match env::var("HIRELANE_TOKEN") {
            Ok(token) if !token.trim().is_empty() => token,
            _ => return Ok(None),
        };

        let id = env::var("HIRELANE_USER_ID").map_err(|_| ConfigError::IncompleteSession)?;
        let name = env::var("HIRELANE_USER_NAME").map_err(|_| ConfigError::IncompleteSession)?;
        let raw_role = env::var("HIRELANE_USER_ROLE").map_err(|_| ConfigError::IncompleteSession)?;
        let role =
            UserRole::parse(&raw_role).ok_or(ConfigError::InvalidRole { found: raw_role })?;

        Ok(Some(PersistedSession {
            token,
            user: CurrentUser { id, name, role },
        }))
    }
}

/// Settings for reaching the backend API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidApiUrl { found: String },
    InvalidTimeout,
    IncompleteSession,
    InvalidRole { found: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidApiUrl { found } => {
                write!(f, "HIRELANE_API_URL must be an http(s) URL, found '{found}'")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "HIRELANE_API_TIMEOUT_SECS must be a valid u64")
            }
            ConfigError::IncompleteSession => write!(
                f,
                "HIRELANE_TOKEN requires HIRELANE_USER_ID, HIRELANE_USER_NAME, and HIRELANE_USER_ROLE"
            ),
            ConfigError::InvalidRole { found } => {
                write!(
                    f,
                    "HIRELANE_USER_ROLE must be 'candidate' or 'company', found '{found}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("HIRELANE_ENV");
        env::remove_var("HIRELANE_API_URL");
        env::remove_var("HIRELANE_API_TIMEOUT_SECS");
        env::remove_var("HIRELANE_LOG_LEVEL");
        env::remove_var("HIRELANE_TOKEN");
        env::remove_var("HIRELANE_USER_ID");
        env::remove_var("HIRELANE_USER_NAME");
        env::remove_var("HIRELANE_USER_ROLE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.api.base_url, "http://127.0.0.1:4000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.session.is_none());
    }

    #[test]
    fn rejects_non_http_api_url() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("HIRELANE_API_URL", "ftp://example.org");
        let err = AppConfig::load().expect_err("ftp url rejected");
        assert!(matches!(err, ConfigError::InvalidApiUrl { .. }));
    }

    #[test]
    fn token_without_identity_is_incomplete() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("HIRELANE_TOKEN", "tok-1");
        let err = AppConfig::load().expect_err("incomplete session rejected");
        assert!(matches!(err, ConfigError::IncompleteSession));
    }

    #[test]
    fn full_session_restores_role() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("HIRELANE_TOKEN", "tok-1");
        env::set_var("HIRELANE_USER_ID", "user-9");
        env::set_var("HIRELANE_USER_NAME", "Avery");
        env::set_var("HIRELANE_USER_ROLE", "company");
        let config = AppConfig::load().expect("config loads");
        let session = config.session.expect("session present");
        assert_eq!(session.user.role, UserRole::Company);
        assert_eq!(session.user.name, "Avery");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("HIRELANE_TOKEN", "tok-1");
        env::set_var("HIRELANE_USER_ID", "user-9");
        env::set_var("HIRELANE_USER_NAME", "Avery");
        env::set_var("HIRELANE_USER_ROLE", "superadmin");
        let err = AppConfig::load().expect_err("unknown role rejected");
        assert!(matches!(err, ConfigError::InvalidRole { .. }));
    }
}
