//! VoltBank client SDK
//!
//! Client-side core for the VoltBank battery-rental operations platform:
//! a hub-scoped settings cache, hub-aware currency resolution, and the
//! payment settlement engine used whenever an operator collects a payment
//! against a rental or account balance.
//!
//! # Wiring
//!
//! ```no_run
//! use std::sync::Arc;
//! use voltbank::{ApiClient, ClientConfig, CurrencyResolver, HubSettingsCache,
//!     PaymentSettlementEngine};
//!
//! # async fn example() -> Result<(), voltbank::AppError> {
//! let config = ClientConfig::load()?;
//! let api = Arc::new(ApiClient::new(&config.api)?);
//!
//! let settings = Arc::new(HubSettingsCache::new(api.clone()));
//! let currency = CurrencyResolver::new(settings.clone());
//! let mut engine = PaymentSettlementEngine::new(api.clone());
//! # Ok(())
//! # }
//! ```

use tracing_subscriber::EnvFilter;

pub use voltbank_cache::HubSettingsCache;
pub use voltbank_client::ApiClient;
pub use voltbank_core::config::{ApiConfig, ClientConfig};
pub use voltbank_core::models::{
    AccountTransaction, HubSettings, HubSettingsPatch, PaymentData, PaymentType, TransactionType,
    UserAccount,
};
pub use voltbank_core::traits::{AccountService, SettingsService};
pub use voltbank_core::{AppError, AppResult};
pub use voltbank_services::{
    currency_symbol, CreditError, CurrencyResolver, FormState, PaymentSettlementEngine,
};

/// Initialize tracing for host applications
///
/// Respects `RUST_LOG` when set, defaulting to info-level output for the
/// voltbank crates. Call once at startup; repeat calls are ignored.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("voltbank=info,voltbank_cache=info,voltbank_client=info,voltbank_services=info")
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
}
