use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;
use thiserror::Error;

use crate::analytics::{Calendar, WeekNumbering};
use crate::auth::JwtConfig;
use crate::auth::jwt::MIN_SECRET_LEN;
use crate::reports::EngineSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BUSINESS_TIMEZONE is not a known IANA timezone: {0}")]
    InvalidTimezone(String),

    #[error("WEEK_NUMBERING must be 'sunday' or 'iso', got {0:?}")]
    InvalidWeekNumbering(String),

    #[error("JWT_SECRET must be set outside development")]
    MissingJwtSecret,

    #[error("JWT_SECRET must be at least {} characters long", MIN_SECRET_LEN)]
    WeakJwtSecret,
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | BUSINESS_TIMEZONE | UTC | IANA name used for calendar math |
/// | STORE_TIMEOUT_MS | 5000 | bound on each store query |
/// | REQUEST_TIMEOUT_MS | 30000 | whole-request timeout |
/// | WEEK_NUMBERING | sunday | `sunday` or `iso` |
/// | TRAILING_WINDOW_DAYS | 30 | default window for time-series reports |
/// | DATA_FILE | - | JSON snapshot for the in-memory store |
/// | JWT_SECRET | random (development only) | HMAC secret |
/// | JWT_ISSUER | report-server | token issuer |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
///
/// `LOG_LEVEL`, `LOG_DIR` and `LOG_JSON` are read by the binary before this
/// runs, so configuration warnings are already captured.
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub business_timezone: Tz,
    pub week_numbering: WeekNumbering,
    pub store_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub trailing_window_days: i64,
    pub data_file: Option<String>,
    pub jwt: JwtConfig,
}

fn parse_var<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    var(key).and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset or unparsable numbers fall back to defaults
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());

        let tz_name = var("BUSINESS_TIMEZONE").unwrap_or_else(|| "UTC".into());
        let business_timezone: Tz = tz_name
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(tz_name.clone()))?;

        let week_numbering = match var("WEEK_NUMBERING") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidWeekNumbering(raw.clone()))?,
            None => WeekNumbering::default(),
        };

        let secret = match var("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) if secret.len() < MIN_SECRET_LEN => return Err(ConfigError::WeakJwtSecret),
            Some(secret) => secret,
            None if environment == "development" => {
                tracing::warn!("JWT_SECRET not set, generating a temporary development key");
                crate::auth::jwt::generate_printable_secret()
            }
            None => return Err(ConfigError::MissingJwtSecret),
        };

        let jwt = JwtConfig {
            secret,
            expiration_minutes: parse_var(&var, "JWT_EXPIRATION_MINUTES").unwrap_or(1440),
            issuer: var("JWT_ISSUER").unwrap_or_else(|| "report-server".into()),
        };

        Ok(Self {
            http_port: parse_var(&var, "HTTP_PORT").unwrap_or(3000),
            environment,
            business_timezone,
            week_numbering,
            store_timeout_ms: parse_var(&var, "STORE_TIMEOUT_MS").unwrap_or(5000),
            request_timeout_ms: parse_var(&var, "REQUEST_TIMEOUT_MS").unwrap_or(30000),
            trailing_window_days: parse_var(&var, "TRAILING_WINDOW_DAYS")
                .filter(|d: &i64| *d > 0)
                .unwrap_or(30),
            data_file: var("DATA_FILE").filter(|s| !s.is_empty()),
            jwt,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.business_timezone, self.week_numbering)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            calendar: self.calendar(),
            store_timeout: Duration::from_millis(self.store_timeout_ms),
            trailing_days: self.trailing_window_days,
        }
    }
}
