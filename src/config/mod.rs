//! Engine configuration loaded from the environment.
//!
//! Values come from process environment variables, optionally seeded from a
//! `.env` file. Every setting has a default except the database URL, which
//! only the `PostgreSQL` adapters need.

use crate::engagement::domain::ReapplicationCooldown;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Environment variable holding the cooldown length in seconds.
pub const COOLDOWN_SECS_VAR: &str = "ENGAGEMENT_COOLDOWN_SECS";
/// Environment variable holding the log filter.
pub const LOG_LEVEL_VAR: &str = "ENGAGEMENT_LOG_LEVEL";
/// Environment variable holding the `PostgreSQL` connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Default reapplication cooldown: one hour.
pub const DEFAULT_COOLDOWN_SECS: u64 = 3600;

/// Top-level engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Seconds a tasker must wait after withdrawing before reapplying.
    pub reapplication_cooldown_secs: u64,
    /// `PostgreSQL` connection string, when persistence is database-backed.
    pub database_url: Option<String>,
    /// Logging settings.
    pub telemetry: TelemetryConfig,
}

/// Settings for the tracing subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TelemetryConfig {
    /// Fallback `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reapplication_cooldown_secs: DEFAULT_COOLDOWN_SECS,
            database_url: None,
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Loads settings from `.env` (when present) and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCooldown`] when the cooldown is not a
    /// whole number of seconds or is too large to represent.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let reapplication_cooldown_secs = match env::var(COOLDOWN_SECS_VAR) {
            Ok(raw) => parse_cooldown(&raw)?,
            Err(_) => defaults.reapplication_cooldown_secs,
        };
        let log_level = env::var(LOG_LEVEL_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.telemetry.log_level);
        let database_url = env::var(DATABASE_URL_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty());

        Ok(Self {
            reapplication_cooldown_secs,
            database_url,
            telemetry: TelemetryConfig { log_level },
        })
    }

    /// Returns the configured reapplication cooldown.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCooldown`] when the configured length
    /// cannot be represented as a duration.
    pub fn cooldown(&self) -> Result<ReapplicationCooldown, ConfigError> {
        ReapplicationCooldown::from_secs(self.reapplication_cooldown_secs).ok_or_else(|| {
            ConfigError::InvalidCooldown {
                value: self.reapplication_cooldown_secs.to_string(),
            }
        })
    }

    /// Returns the database URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when none is configured.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)
    }
}

fn parse_cooldown(raw: &str) -> Result<u64, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidCooldown {
            value: raw.to_owned(),
        })?;
    ReapplicationCooldown::from_secs(secs)
        .map(|_| secs)
        .ok_or_else(|| ConfigError::InvalidCooldown {
            value: raw.to_owned(),
        })
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The cooldown is not a usable number of seconds.
    #[error("{COOLDOWN_SECS_VAR} must be a non-negative whole number of seconds, got '{value}'")]
    InvalidCooldown {
        /// Offending value.
        value: String,
    },

    /// No database URL is configured.
    #[error("{DATABASE_URL_VAR} must be set to use PostgreSQL persistence")]
    MissingDatabaseUrl,
}
