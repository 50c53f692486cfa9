use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the pipeline.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url = env::var("ASSESSMENT_BASE_URL")
            .unwrap_or_else(|_| "https://assessment.ksensetech.com".to_string());
        let api_key = env::var("ASSESSMENT_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let page_size = env::var("ASSESSMENT_PAGE_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .ok()
            .filter(|size| *size > 0)
            .ok_or(ConfigError::InvalidPageSize)?;
        let page_delay_ms = env::var("ASSESSMENT_PAGE_DELAY_MS")
            .unwrap_or_else(|_| "2000".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidPageDelay)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            api: ApiConfig {
                base_url,
                api_key,
                page_size,
                page_delay_ms,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings for the remote assessment service. The API key is optional at
/// load time so offline commands work without credentials; the fetch client
/// insists on it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub page_size: u32,
    pub page_delay_ms: u64,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPageSize,
    InvalidPageDelay,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPageSize => {
                write!(f, "ASSESSMENT_PAGE_SIZE must be a positive integer")
            }
            ConfigError::InvalidPageDelay => {
                write!(f, "ASSESSMENT_PAGE_DELAY_MS must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("ASSESSMENT_BASE_URL");
        env::remove_var("ASSESSMENT_API_KEY");
        env::remove_var("ASSESSMENT_PAGE_SIZE");
        env::remove_var("ASSESSMENT_PAGE_DELAY_MS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.api.page_size, 10);
        assert_eq!(config.api.page_delay_ms, 2000);
        assert_eq!(config.api.api_key, None);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn blank_api_key_counts_as_unset() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ASSESSMENT_API_KEY", "   ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.api.api_key, None);
    }

    #[test]
    fn rejects_zero_page_size() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ASSESSMENT_PAGE_SIZE", "0");
        let error = AppConfig::load().expect_err("zero page size rejected");
        assert!(matches!(error, ConfigError::InvalidPageSize));
        env::remove_var("ASSESSMENT_PAGE_SIZE");
    }
}
