//! Client configuration
//!
//! Centralized configuration management using the `config` crate.
//! Configuration is layered from an optional `voltbank.toml` file and
//! `VOLTBANK_*` environment variables, then validated.

use config::{Config, Environment, File};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;

/// Main client configuration
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ClientConfig {
    #[validate(nested)]
    pub api: ApiConfig,
}

/// Remote platform API configuration
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ApiConfig {
    /// Base URL of the platform API
    #[validate(url)]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    #[validate(range(min = 1))]
    pub timeout_secs: u64,

    /// Bearer token attached to every request when present
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_timeout() -> u64 {
    30
}

impl ClientConfig {
    /// Load configuration from `voltbank.toml` (optional) and the
    /// environment, e.g. `VOLTBANK_API__BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when required values are missing and
    /// `AppError::Validation` when loaded values are out of range.
    pub fn load() -> Result<Self, AppError> {
        let config: ClientConfig = Config::builder()
            .add_source(File::with_name("voltbank").required(false))
            .add_source(Environment::with_prefix("VOLTBANK").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_default() {
        let api: ApiConfig =
            serde_json::from_str(r#"{"base_url": "http://localhost:8000"}"#).unwrap();
        assert_eq!(api.timeout_secs, 30);
        assert_eq!(api.auth_token, None);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let api = ApiConfig {
            base_url: "not a url".to_string(),
            timeout_secs: 30,
            auth_token: None,
        };
        assert!(api.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let api = ApiConfig {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 0,
            auth_token: None,
        };
        assert!(api.validate().is_err());
    }
}
