use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::portal::payment::PaymentWidgetConfig;
use crate::portal::validation::RulesetVersion;

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

/// Top-level configuration for the portal service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub portal: PortalConfig,
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
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::UnknownLogFormat { value: raw })?,
            Err(_) => LogFormat::Compact,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            portal: PortalConfig::from_env()?,
        })
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

/// Output layout for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

/// Which rule set gates the review step, and how the payment widget is wired.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    pub ruleset: RulesetVersion,
    pub payment: PaymentWidgetConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            ruleset: RulesetVersion::Current,
            payment: PaymentWidgetConfig::default(),
        }
    }
}

impl PortalConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("PORTAL_RULESET") {
            config.ruleset =
                RulesetVersion::parse(&raw).ok_or(ConfigError::UnknownRuleset { value: raw })?;
        }
        if let Ok(src) = env::var("PAYMENT_SCRIPT_URL") {
            config.payment.script_src = src;
        }
        if let Ok(id) = env::var("PAYMENT_BUTTON_ID") {
            config.payment.payment_button_id = id;
        }
        if let Ok(raw) = env::var("PAYMENT_POLL_INTERVAL_MS") {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|millis| *millis > 0)
                .ok_or(ConfigError::InvalidPollInterval)?;
            config.payment.poll_interval = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPollInterval,
    UnknownRuleset { value: String },
    UnknownLogFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPollInterval => write!(
                f,
                "PAYMENT_POLL_INTERVAL_MS must be a positive number of milliseconds"
            ),
            ConfigError::UnknownRuleset { value } => write!(
                f,
                "PORTAL_RULESET '{value}' is not one of: current, legacy"
            ),
            ConfigError::UnknownLogFormat { value } => {
                write!(f, "APP_LOG_FORMAT '{value}' is not one of: compact, json")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidPollInterval
            | ConfigError::UnknownRuleset { .. }
            | ConfigError::UnknownLogFormat { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::payment::{DEFAULT_PAYMENT_BUTTON_ID, DEFAULT_POLL_INTERVAL};
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
            "APP_LOG_FORMAT",
            "PORTAL_RULESET",
            "PAYMENT_SCRIPT_URL",
            "PAYMENT_BUTTON_ID",
            "PAYMENT_POLL_INTERVAL_MS",
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
        assert_eq!(config.telemetry.format, LogFormat::Compact);
        assert_eq!(config.portal.ruleset, RulesetVersion::Current);
        assert_eq!(
            config.portal.payment.payment_button_id,
            DEFAULT_PAYMENT_BUTTON_ID
        );
        assert_eq!(config.portal.payment.poll_interval, DEFAULT_POLL_INTERVAL);
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
    fn portal_settings_come_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PORTAL_RULESET", "Legacy");
        env::set_var("PAYMENT_BUTTON_ID", "pl_test");
        env::set_var("PAYMENT_POLL_INTERVAL_MS", "250");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.portal.ruleset, RulesetVersion::Legacy);
        assert_eq!(config.portal.payment.payment_button_id, "pl_test");
        assert_eq!(
            config.portal.payment.poll_interval,
            Duration::from_millis(250)
        );
        reset_env();
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PAYMENT_POLL_INTERVAL_MS", "0");
        let err = AppConfig::load().expect_err("zero interval rejected");
        assert!(matches!(err, ConfigError::InvalidPollInterval));
        reset_env();
    }

    #[test]
    fn rejects_unknown_ruleset() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PORTAL_RULESET", "v9");
        let err = AppConfig::load().expect_err("unknown ruleset rejected");
        assert!(matches!(err, ConfigError::UnknownRuleset { ref value } if value == "v9"));
        reset_env();
    }
}
