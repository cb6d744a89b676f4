//! Unified error handling for the VoltBank client
//!
//! All failures in the SDK are expressed as `AppError`. Remote failures are
//! recoverable by design: the cache substitutes fallback settings and the
//! settlement engine substitutes a zero balance, so most of these variants
//! are logged at the component boundary rather than surfaced to the operator.

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Transport Errors ====================
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API returned status {status}")]
    Api { status: u16 },

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    // ==================== Internal Errors ====================
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns true for remote failures that downstream components absorb
    /// into fallback values (settings defaults, zero balance) instead of
    /// propagating to the operator.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_) | AppError::Api { .. } | AppError::Timeout(_)
        )
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
