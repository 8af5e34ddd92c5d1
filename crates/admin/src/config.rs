//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional.
//! - `AACHAR_LOGIN_DELAY_MS` - Mock login latency (default: 2000)
//! - `AACHAR_SIGNUP_DELAY_MS` - Mock signup latency (default: 2500)
//! - `AACHAR_SEED_CATALOG` - Start sessions with the sample catalog (default: true)
//! - `AACHAR_CURRENCY` - Currency prices are entered in (default: INR)
//! - `AACHAR_LOG_JSON` - Emit JSON logs instead of text (default: false)

use std::time::Duration;

use thiserror::Error;

use aachar_core::CurrencyCode;

use crate::services::MockIdentityProvider;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin console configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Artificial delay before a login completes
    pub login_delay: Duration,
    /// Artificial delay before a signup completes
    pub signup_delay: Duration,
    /// Whether a new admin session starts with sample products
    pub seed_catalog: bool,
    /// Currency product prices are in
    pub currency: CurrencyCode,
    /// JSON log output (for log shipping) instead of human-readable text
    pub log_json: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            login_delay: MockIdentityProvider::LOGIN_DELAY,
            signup_delay: MockIdentityProvider::SIGNUP_DELAY,
            seed_catalog: true,
            currency: CurrencyCode::INR,
            log_json: false,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let login_delay = get_millis(&lookup, "AACHAR_LOGIN_DELAY_MS")?.unwrap_or(defaults.login_delay);
        let signup_delay =
            get_millis(&lookup, "AACHAR_SIGNUP_DELAY_MS")?.unwrap_or(defaults.signup_delay);
        let seed_catalog =
            get_bool(&lookup, "AACHAR_SEED_CATALOG")?.unwrap_or(defaults.seed_catalog);
        let currency = match lookup("AACHAR_CURRENCY") {
            Some(raw) => raw
                .parse::<CurrencyCode>()
                .map_err(|e| ConfigError::InvalidEnvVar("AACHAR_CURRENCY".to_string(), e))?,
            None => defaults.currency,
        };
        let log_json = get_bool(&lookup, "AACHAR_LOG_JSON")?.unwrap_or(defaults.log_json);

        Ok(Self {
            login_delay,
            signup_delay,
            seed_catalog,
            currency,
            log_json,
        })
    }

    /// Identity provider honoring the configured delays.
    #[must_use]
    pub const fn identity_provider(&self) -> MockIdentityProvider {
        MockIdentityProvider::new(self.login_delay, self.signup_delay)
    }
}

fn get_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<Duration>, ConfigError> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

fn get_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<bool>, ConfigError> {
    lookup(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected a boolean, got {other:?}"),
            )),
        })
        .transpose()
}
