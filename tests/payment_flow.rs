//! End-to-end payment collection flow against mock platform services:
//! settings cache warm-up, currency resolution, balance fetch, credit
//! validation, and payload construction.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use voltbank::{
    AccountService, AccountTransaction, AppError, CreditError, CurrencyResolver, FormState,
    HubSettings, HubSettingsPatch, HubSettingsCache, PaymentSettlementEngine, PaymentType,
    SettingsService, UserAccount,
};

/// Mock platform API with one hub and one user account
struct MockPlatform {
    hub_settings: Option<HubSettings>,
    balance: Decimal,
    settings_calls: AtomicUsize,
}

impl MockPlatform {
    fn new(hub_settings: Option<HubSettings>, balance: Decimal) -> Arc<Self> {
        Arc::new(Self {
            hub_settings,
            balance,
            settings_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SettingsService for MockPlatform {
    async fn get_hub_settings(&self, _hub_id: i32) -> Result<HubSettings, AppError> {
        self.settings_calls.fetch_add(1, Ordering::SeqCst);
        self.hub_settings
            .clone()
            .ok_or(AppError::Api { status: 500 })
    }

    async fn update_hub_settings(
        &self,
        hub_id: i32,
        patch: &HubSettingsPatch,
    ) -> Result<HubSettings, AppError> {
        let base = self
            .hub_settings
            .clone()
            .unwrap_or_else(|| HubSettings::fallback(hub_id));
        Ok(base.apply(patch))
    }
}

#[async_trait]
impl AccountService for MockPlatform {
    async fn get_user_account(&self, user_id: i32) -> Result<UserAccount, AppError> {
        Ok(UserAccount {
            user_id,
            balance: self.balance,
            updated_at: None,
        })
    }

    async fn get_user_transactions(
        &self,
        _user_id: i32,
        _limit: i64,
        _offset: i64,
    ) -> Result<Vec<AccountTransaction>, AppError> {
        Ok(vec![])
    }
}

fn malawi_hub() -> HubSettings {
    HubSettings {
        default_currency: "MWK".to_string(),
        ..HubSettings::fallback(1)
    }
}

#[tokio::test]
async fn collects_blended_payment_end_to_end() {
    let platform = MockPlatform::new(Some(malawi_hub()), dec!(30));

    let settings = Arc::new(HubSettingsCache::new(platform.clone()));
    let currency = CurrencyResolver::new(settings.clone());
    let mut engine = PaymentSettlementEngine::new(platform.clone());

    // Warm the settings cache for the operator's hub; a second load is a hit
    settings.load(1).await;
    settings.load(1).await;
    assert_eq!(platform.settings_calls.load(Ordering::SeqCst), 1);

    let symbol = currency.symbol_for_hub(1);
    assert_eq!(symbol, "MK");

    // Operator opens the payment dialog for a 50.00 rental charge
    let amount_owed = dec!(50);
    engine
        .initialize(amount_owed, PaymentType::Cash, Some(12))
        .await;
    assert_eq!(engine.balance(), dec!(30));

    // Credit beyond the balance is rejected with the available figure
    let err = engine.apply_credit(dec!(40), amount_owed).unwrap_err();
    assert_eq!(err.to_string(), "Cannot exceed available credit (30.00)");

    // Apply the full balance as credit, tender the rest in cash
    engine.apply_credit(dec!(30), amount_owed).unwrap();
    engine.set_payment_amount(dec!(20));
    assert_eq!(engine.total_payment(), dec!(50));
    assert_eq!(engine.remaining_after_payment(amount_owed), dec!(0));

    engine.set_notes("settled at hub desk");
    engine.confirm(true);
    let data = engine.finalize(amount_owed).unwrap();

    assert_eq!(data.payment_amount, dec!(20));
    assert_eq!(data.credit_applied, dec!(30));
    assert_eq!(data.payment_type, Some(PaymentType::Cash));
    assert_eq!(data.payment_notes.as_deref(), Some("settled at hub desk"));

    assert_eq!(
        engine.format_success_message(&symbol, None),
        "Payment of MK50.00 recorded successfully (including MK30.00 credit)"
    );
    assert_eq!(engine.state(), FormState::Submitted);
}

#[tokio::test]
async fn settings_outage_still_allows_collection() {
    // Settings endpoint down: the hub falls back to USD defaults and the
    // payment flow continues
    let platform = MockPlatform::new(None, dec!(0));

    let settings = Arc::new(HubSettingsCache::new(platform.clone()));
    let currency = CurrencyResolver::new(settings.clone());
    let mut engine = PaymentSettlementEngine::new(platform.clone());

    let hub = settings.load(9).await;
    assert_eq!(hub.default_currency, "USD");
    assert_eq!(hub.default_table_rows_per_page, 50);
    assert_eq!(hub.vat_percentage, dec!(0));
    assert_eq!(hub.timezone, "UTC");

    engine.initialize(dec!(15), PaymentType::Cash, Some(4)).await;

    // No credit available against a zero balance
    assert_eq!(
        engine.validate_credit_amount(dec!(1), dec!(15)),
        Err(CreditError::ExceedsAvailableCredit {
            available: dec!(0)
        })
    );

    engine.confirm(true);
    let data = engine.finalize(dec!(15)).unwrap();
    assert_eq!(data.credit_applied, dec!(0));
    assert_eq!(currency.format(data.payment_amount, 9), "$15.00");
}

#[tokio::test]
async fn symbol_override_applies_after_settings_edit() {
    let platform = MockPlatform::new(Some(malawi_hub()), dec!(0));
    let settings = Arc::new(HubSettingsCache::new(platform.clone()));
    let currency = CurrencyResolver::new(settings.clone());

    settings.load(1).await;
    assert_eq!(currency.symbol_for_hub(1), "MK");

    // A settings edit is persisted server-side, then merged into the cache
    let patch = HubSettingsPatch {
        currency_symbol: Some("Kz".to_string()),
        ..Default::default()
    };
    platform.update_hub_settings(1, &patch).await.unwrap();
    settings.update(1, &patch);

    assert_eq!(currency.symbol_for_hub(1), "Kz");
    assert_eq!(currency.format(dec!(10.005), 1), "Kz10.01");
}

#[tokio::test]
async fn partial_payments_round_once_per_settlement() {
    let platform = MockPlatform::new(Some(malawi_hub()), dec!(5));
    let mut engine = PaymentSettlementEngine::new(platform.clone());

    // 10.005 owed, 5 cash + 5 credit: the remainder rounds to zero at the
    // cent boundary instead of lingering at a fraction of a cent
    let owed = dec!(10.005);
    engine.initialize(dec!(5), PaymentType::Cash, Some(2)).await;
    engine.apply_credit(dec!(5), owed).unwrap();

    assert_eq!(engine.total_payment(), dec!(10));
    assert_eq!(engine.remaining_after_payment(owed), dec!(0.00));
}
