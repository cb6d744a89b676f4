//! VoltBank Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the VoltBank client SDK. It includes:
//!
//! - Domain models (HubSettings, UserAccount, PaymentData, etc.)
//! - Service traits for the remote platform API
//! - Unified error handling
//! - Client configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::ClientConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
