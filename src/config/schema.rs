//! Configuration schema definitions.
//!
//! This module defines the daemon's configuration structure.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::level::Level;

/// Root configuration for the log level daemon.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Local logging output.
    pub logging: LoggingConfig,

    /// Which remote configuration to follow.
    pub subscription: SubscriptionConfig,

    /// Admin API settings.
    pub admin: AdminConfig,

    /// Metrics exporter settings.
    pub metrics: MetricsConfig,
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Root level before the first push arrives.
    pub level: Level,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: LogFormat::Pretty,
        }
    }
}

/// Kind of remote configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Properties files in `directory`, one per config id.
    #[default]
    File,
    /// Snapshots pushed through the admin API.
    Http,
}

/// Subscription configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubscriptionConfig {
    /// Identifier of the configuration to follow.
    pub config_id: String,

    /// Where snapshots come from.
    pub source: SourceKind,

    /// Directory holding config files (file source only).
    pub directory: PathBuf,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            config_id: "logging.properties".to_string(),
            source: SourceKind::File,
            directory: PathBuf::from("config"),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin API bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Metrics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Enable the Prometheus endpoint.
    pub enabled: bool,

    /// Metrics endpoint bind address.
    pub address: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.logging.level, Level::Info);
        assert_eq!(config.subscription.source, SourceKind::File);
        assert!(!config.admin.enabled);
    }

    #[test]
    fn test_parse_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [logging]
            level = "warn"
            format = "json"

            [subscription]
            config_id = "orders-service"
            source = "http"

            [admin]
            enabled = true
            api_key = "secret"
            bind_address = "127.0.0.1:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level, Level::Warn);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.subscription.config_id, "orders-service");
        assert_eq!(config.subscription.source, SourceKind::Http);
        assert_eq!(config.admin.api_key, "secret");
    }
}
