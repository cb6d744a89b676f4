//! Currency resolution
//!
//! Maps currency codes to display symbols and formats amounts consistently
//! from the cached hub settings. Formatting is pure given a settings
//! snapshot: two decimals, half-up rounding at the cent boundary, symbol
//! prefix, no thousands separators.

use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;
use voltbank_cache::HubSettingsCache;
use voltbank_core::traits::SettingsService;

/// Fixed code-to-symbol mapping for the currencies the platform operates in
const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("GBP", "£"),
    ("EUR", "€"),
    ("MWK", "MK"),
    ("ZAR", "R"),
    ("KES", "KSh"),
    ("UGX", "USh"),
    ("TZS", "TSh"),
    ("NGN", "₦"),
    ("GHS", "₵"),
    ("RWF", "RF"),
];

/// Display symbol for a currency code
///
/// Unknown codes are returned unchanged rather than failing, so a newly
/// configured currency degrades to showing its code.
pub fn currency_symbol(code: &str) -> &str {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, symbol)| *symbol)
        .unwrap_or(code)
}

/// Hub-aware currency resolver
///
/// Reads the cached settings snapshot for a hub; hubs that have not been
/// loaded resolve to the USD defaults, matching the cache's fallback.
pub struct CurrencyResolver<S: SettingsService + 'static> {
    cache: Arc<HubSettingsCache<S>>,
}

impl<S: SettingsService + 'static> CurrencyResolver<S> {
    pub fn new(cache: Arc<HubSettingsCache<S>>) -> Self {
        Self { cache }
    }

    /// Currency code for a hub, "USD" when not cached
    pub fn hub_currency(&self, hub_id: i32) -> String {
        self.cache
            .peek(hub_id)
            .map(|s| s.default_currency.clone())
            .unwrap_or_else(|| "USD".to_string())
    }

    /// Display symbol for a hub
    ///
    /// A non-empty per-hub symbol override is returned verbatim; otherwise
    /// the hub's currency code is mapped through the fixed table.
    pub fn symbol_for_hub(&self, hub_id: i32) -> String {
        if let Some(settings) = self.cache.peek(hub_id) {
            if let Some(symbol) = &settings.currency_symbol {
                if !symbol.is_empty() {
                    return symbol.clone();
                }
            }
            return currency_symbol(&settings.default_currency).to_string();
        }
        currency_symbol("USD").to_string()
    }

    /// Format an amount for a hub: symbol prefix, exactly two decimals
    pub fn format(&self, amount: Decimal, hub_id: i32) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{:.2}", self.symbol_for_hub(hub_id), rounded)
    }

    /// Like [`format`](Self::format), treating a missing amount as zero
    pub fn format_opt(&self, amount: Option<Decimal>, hub_id: i32) -> String {
        self.format(amount.unwrap_or(Decimal::ZERO), hub_id)
    }

    /// Load the hub's settings through the cache first, then resolve the
    /// symbol; use this on paths that may run before the hub is cached
    pub async fn resolve_symbol(&self, hub_id: i32) -> String {
        let settings = self.cache.load(hub_id).await;
        if let Some(symbol) = &settings.currency_symbol {
            if !symbol.is_empty() {
                return symbol.clone();
            }
        }
        currency_symbol(&settings.default_currency).to_string()
    }
}
