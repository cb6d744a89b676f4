//! Hub settings model
//!
//! Per-hub operational configuration: currency, pagination, notification
//! thresholds, VAT, and timezone. Snapshots are immutable; the cache replaces
//! them wholesale on refresh or merge, never field-by-field in place.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-hub configuration snapshot
///
/// Every field carries a serde default so a partial API response still
/// deserializes into a complete snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubSettings {
    /// Hub identifier
    #[serde(default)]
    pub hub_id: i32,

    /// ISO-like currency code, e.g. "USD"
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Display symbol override; takes precedence over the code mapping
    /// when non-empty
    #[serde(default)]
    pub currency_symbol: Option<String>,

    /// Default pagination size for tables
    #[serde(default = "default_rows_per_page")]
    pub default_table_rows_per_page: u32,

    /// Balance at or below which a user is flagged for debt notification
    #[serde(default = "default_debt_threshold")]
    pub debt_notification_threshold: Decimal,

    /// Hours after the due time before a rental is flagged overdue
    #[serde(default = "default_overdue_hours")]
    pub overdue_notification_hours: u32,

    /// VAT percentage applied by this hub
    #[serde(default)]
    pub vat_percentage: Decimal,

    /// IANA-style timezone name
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_rows_per_page() -> u32 {
    50
}

fn default_debt_threshold() -> Decimal {
    Decimal::from(-100)
}

fn default_overdue_hours() -> u32 {
    24
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl HubSettings {
    /// Documented fallback defaults, substituted when the remote fetch fails
    /// so downstream consumers never observe an absent configuration.
    pub fn fallback(hub_id: i32) -> Self {
        Self {
            hub_id,
            default_currency: default_currency(),
            currency_symbol: None,
            default_table_rows_per_page: default_rows_per_page(),
            debt_notification_threshold: default_debt_threshold(),
            overdue_notification_hours: default_overdue_hours(),
            vat_percentage: Decimal::ZERO,
            timezone: default_timezone(),
        }
    }

    /// Produce a new snapshot with the patch's set fields shallow-merged in
    pub fn apply(&self, patch: &HubSettingsPatch) -> Self {
        let mut next = self.clone();
        if let Some(currency) = &patch.default_currency {
            next.default_currency = currency.clone();
        }
        if let Some(symbol) = &patch.currency_symbol {
            next.currency_symbol = Some(symbol.clone());
        }
        if let Some(rows) = patch.default_table_rows_per_page {
            next.default_table_rows_per_page = rows;
        }
        if let Some(threshold) = patch.debt_notification_threshold {
            next.debt_notification_threshold = threshold;
        }
        if let Some(hours) = patch.overdue_notification_hours {
            next.overdue_notification_hours = hours;
        }
        if let Some(vat) = patch.vat_percentage {
            next.vat_percentage = vat;
        }
        if let Some(timezone) = &patch.timezone {
            next.timezone = timezone.clone();
        }
        next
    }
}

/// Partial settings update
///
/// All fields optional; unset fields are left untouched by the merge and
/// omitted from the wire payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_table_rows_per_page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_notification_threshold: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdue_notification_hours: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_percentage: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}
