//! Domain models for the VoltBank client

pub mod account;
pub mod hub_settings;
pub mod payment;

pub use account::{AccountTransaction, TransactionType, UserAccount};
pub use hub_settings::{HubSettings, HubSettingsPatch};
pub use payment::{PaymentData, PaymentType};
