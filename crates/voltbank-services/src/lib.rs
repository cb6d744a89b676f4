//! Business logic services for the VoltBank client
//!
//! # Architecture
//!
//! Services are designed to be composable and testable:
//! - Each service owns its dependencies (settings cache, account service)
//!   behind an `Arc`
//! - Remote failures are absorbed into safe defaults at the service boundary
//! - All remote call paths are instrumented with tracing
//!
//! # Services
//!
//! - [`CurrencyResolver`] - Hub-aware currency symbols and amount formatting
//! - [`PaymentSettlementEngine`] - Blended cash + account-credit payment
//!   workflow: balance fetch, credit validation, payload construction

pub mod currency;
pub mod settlement;

pub use currency::{currency_symbol, CurrencyResolver};
pub use settlement::{CreditError, FormState, PaymentSettlementEngine};
