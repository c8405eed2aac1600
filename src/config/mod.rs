use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::workflows::underwriting::evaluation::{
    EvaluationConfig, EvaluationProfile, FallbackDialect,
};
use crate::workflows::underwriting::narrative::{
    RetryPolicy, DEFAULT_CALL_TIMEOUT, DEFAULT_MAX_ATTEMPTS,
};

/// Distinguishes runtime behavior for different stages of the service.
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
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub underwriting: EvaluationConfig,
    pub narrative: NarrativeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            underwriting: load_underwriting()?,
            narrative: load_narrative()?,
        })
    }
}

fn load_underwriting() -> Result<EvaluationConfig, ConfigError> {
    let profile = match env::var("UNDERWRITING_PROFILE") {
        Ok(value) => EvaluationProfile::from_str(&value)
            .ok_or(ConfigError::InvalidProfile { value })?,
        Err(_) => EvaluationProfile::default(),
    };

    let fallback = match env::var("UNDERWRITING_FALLBACK") {
        Ok(value) => FallbackDialect::from_str(&value)
            .ok_or(ConfigError::InvalidFallback { value })?,
        Err(_) => FallbackDialect::default(),
    };

    let screen_borrower_type = match env::var("UNDERWRITING_SCREEN_BORROWER") {
        Ok(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag {
            key: "UNDERWRITING_SCREEN_BORROWER",
            value,
        })?,
        Err(_) => true,
    };

    Ok(EvaluationConfig {
        profile,
        fallback,
        screen_borrower_type,
    })
}

fn load_narrative() -> Result<NarrativeConfig, ConfigError> {
    let max_attempts = match env::var("NARRATIVE_MAX_ATTEMPTS") {
        Ok(value) => value
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|attempts| *attempts >= 1)
            .ok_or(ConfigError::InvalidAttempts)?,
        Err(_) => DEFAULT_MAX_ATTEMPTS,
    };

    let call_timeout = match env::var("NARRATIVE_TIMEOUT_MS") {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidTimeout)?,
        Err(_) => DEFAULT_CALL_TIMEOUT,
    };

    Ok(NarrativeConfig {
        max_attempts,
        call_timeout,
    })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Bounds for the narrative collaborator calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrativeConfig {
    pub max_attempts: u32,
    pub call_timeout: Duration,
}

impl NarrativeConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.call_timeout)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidProfile { value: String },
    InvalidFallback { value: String },
    InvalidFlag { key: &'static str, value: String },
    InvalidAttempts,
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidProfile { value } => write!(
                f,
                "UNDERWRITING_PROFILE must be full_review or happy_path, got '{}'",
                value
            ),
            ConfigError::InvalidFallback { value } => write!(
                f,
                "UNDERWRITING_FALLBACK must be conditional_pass or fail, got '{}'",
                value
            ),
            ConfigError::InvalidFlag { key, value } => {
                write!(f, "{} must be a boolean flag, got '{}'", key, value)
            }
            ConfigError::InvalidAttempts => {
                write!(f, "NARRATIVE_MAX_ATTEMPTS must be a positive integer")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "NARRATIVE_TIMEOUT_MS must be a whole number of milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

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
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "UNDERWRITING_PROFILE",
            "UNDERWRITING_FALLBACK",
            "UNDERWRITING_SCREEN_BORROWER",
            "NARRATIVE_MAX_ATTEMPTS",
            "NARRATIVE_TIMEOUT_MS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.underwriting, EvaluationConfig::default());
        assert_eq!(config.narrative.max_attempts, 3);
        assert_eq!(config.narrative.call_timeout, Duration::from_secs(30));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_underwriting_switches() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("UNDERWRITING_PROFILE", "happy_path");
        env::set_var("UNDERWRITING_FALLBACK", "fail");
        env::set_var("UNDERWRITING_SCREEN_BORROWER", "no");
        env::set_var("NARRATIVE_MAX_ATTEMPTS", "5");
        env::set_var("NARRATIVE_TIMEOUT_MS", "250");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.underwriting.profile, EvaluationProfile::HappyPath);
        assert_eq!(config.underwriting.fallback, FallbackDialect::Fail);
        assert!(!config.underwriting.screen_borrower_type);
        let policy = config.narrative.retry_policy();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.call_timeout, Duration::from_millis(250));
        reset_env();
    }

    #[test]
    fn rejects_zero_narrative_attempts() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("NARRATIVE_MAX_ATTEMPTS", "0");
        let error = AppConfig::load().expect_err("zero attempts rejected");
        assert!(matches!(error, ConfigError::InvalidAttempts));
        reset_env();
    }

    #[test]
    fn rejects_unknown_profile() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("UNDERWRITING_PROFILE", "lenient");
        let error = AppConfig::load().expect_err("unknown profile rejected");
        assert!(matches!(error, ConfigError::InvalidProfile { ref value } if value == "lenient"));
        reset_env();
    }
}
