//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses parse and required credentials are present
//!
//! A blank `subscription.config_id` is not an error here: startup logs it and
//! runs with static levels.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{AppConfig, SourceKind};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("admin.api_key must not be empty when the admin API is enabled")]
    EmptyApiKey,

    #[error("http source requires the admin API to be enabled")]
    HttpSourceWithoutAdmin,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.admin.enabled {
        if config.admin.api_key.is_empty() {
            errors.push(ValidationError::EmptyApiKey);
        }
        if config.admin.bind_address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field: "admin.bind_address",
                value: config.admin.bind_address.clone(),
            });
        }
    } else if config.subscription.source == SourceKind::Http {
        errors.push(ValidationError::HttpSourceWithoutAdmin);
    }

    if config.metrics.enabled && config.metrics.address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "metrics.address",
            value: config.metrics.address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.subscription.config_id = " ".into();
        config.subscription.source = SourceKind::Http;
        config.metrics.enabled = true;
        config.metrics.address = "not-an-address".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::HttpSourceWithoutAdmin));
    }

    #[test]
    fn test_blank_config_id_is_accepted() {
        let mut config = AppConfig::default();
        config.subscription.config_id = "   ".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_admin_checks() {
        let mut config = AppConfig::default();
        config.admin.enabled = true;
        config.admin.api_key.clear();
        config.admin.bind_address = "localhost".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::EmptyApiKey));
    }
}
