//! Payment settlement engine
//!
//! Working state of one payment-collection interaction: an operator settles
//! an amount owed with a blend of tendered payment and account credit. The
//! engine fetches the user's balance, validates credit application against
//! it, derives the total, and produces the submission payload and the
//! confirmation message. Submission itself happens outside this crate.
//!
//! Workflow states: Uninitialized -> Editing -> Submitted. Submitted is
//! terminal for the workflow; `initialize` begins a fresh one and `reset`
//! abandons the current one.

use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::{instrument, warn};
use voltbank_core::models::{PaymentData, PaymentType};
use voltbank_core::traits::AccountService;
use voltbank_core::{AppError, AppResult};

/// Workflow state of the payment form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Uninitialized,
    Editing,
    Submitted,
}

/// A rejected credit amount
///
/// Returned as data from [`PaymentSettlementEngine::validate_credit_amount`];
/// never logged as a failure and never panicked. Checks run in priority
/// order and the first violation is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreditError {
    #[error("Credit cannot be negative")]
    Negative,

    #[error("Cannot exceed available credit ({available:.2})")]
    ExceedsAvailableCredit { available: Decimal },

    #[error("Credit applied cannot exceed amount owed")]
    ExceedsAmountOwed,
}

/// Payment settlement engine
///
/// One instance drives one payment workflow at a time. The account balance
/// is fetched fresh on `initialize` and owned by the engine for the duration
/// of the workflow; it is never cached across workflows.
pub struct PaymentSettlementEngine<A: AccountService> {
    accounts: Arc<A>,
    state: FormState,
    payment_amount: Decimal,
    credit_applied: Decimal,
    payment_type: Option<PaymentType>,
    notes: String,
    confirmed: bool,
    balance: Decimal,
    user_id: Option<i32>,
}

impl<A: AccountService> PaymentSettlementEngine<A> {
    /// Create an engine in the Uninitialized state
    pub fn new(accounts: Arc<A>) -> Self {
        Self {
            accounts,
            state: FormState::Uninitialized,
            payment_amount: Decimal::ZERO,
            credit_applied: Decimal::ZERO,
            payment_type: None,
            notes: String::new(),
            confirmed: false,
            balance: Decimal::ZERO,
            user_id: None,
        }
    }

    /// Begin a fresh payment workflow
    ///
    /// Sets the tendered amount and payment type, zeroes applied credit,
    /// clears notes and confirmation, and when a user id is given fetches
    /// that user's account balance before returning. Credit entry must not
    /// be offered until this completes. A failed balance fetch is logged and
    /// leaves the balance at zero; it never aborts initialization. With no
    /// user id the fetch is skipped.
    #[instrument(skip(self))]
    pub async fn initialize(
        &mut self,
        default_amount: Decimal,
        default_payment_type: PaymentType,
        user_id: Option<i32>,
    ) {
        self.payment_amount = default_amount;
        self.payment_type = Some(default_payment_type);
        self.notes.clear();
        self.confirmed = false;
        self.credit_applied = Decimal::ZERO;
        self.balance = Decimal::ZERO;
        self.user_id = user_id;
        self.state = FormState::Editing;

        if let Some(user_id) = user_id {
            self.fetch_balance(user_id).await;
        }
    }

    /// Fetch the user's account balance, degrading to zero on failure
    #[instrument(skip(self))]
    pub async fn fetch_balance(&mut self, user_id: i32) -> Decimal {
        self.user_id = Some(user_id);
        match self.accounts.get_user_account(user_id).await {
            Ok(account) => {
                self.balance = account.balance;
            }
            Err(e) => {
                warn!("Failed to fetch account balance for user {}: {}", user_id, e);
                self.balance = Decimal::ZERO;
            }
        }
        self.balance
    }

    /// Validate a credit amount against the fetched balance and the amount
    /// owed
    ///
    /// Rules, in priority order: credit must not be negative, must not
    /// exceed the available credit (a non-positive balance offers none), and
    /// must not exceed the amount owed. Purely local, always synchronous.
    pub fn validate_credit_amount(
        &self,
        amount: Decimal,
        amount_owed: Decimal,
    ) -> Result<(), CreditError> {
        if amount < Decimal::ZERO {
            return Err(CreditError::Negative);
        }
        let available = self.balance.max(Decimal::ZERO);
        if amount > available {
            return Err(CreditError::ExceedsAvailableCredit { available });
        }
        if amount > amount_owed {
            return Err(CreditError::ExceedsAmountOwed);
        }
        Ok(())
    }

    /// Validate and apply a credit amount
    ///
    /// Validation runs in every state; like the other setters, the write
    /// itself is ignored with a warning outside the Editing state.
    pub fn apply_credit(
        &mut self,
        amount: Decimal,
        amount_owed: Decimal,
    ) -> Result<(), CreditError> {
        self.validate_credit_amount(amount, amount_owed)?;
        if self.editing("applied credit") {
            self.credit_applied = amount;
        }
        Ok(())
    }

    /// Set the tendered payment amount
    pub fn set_payment_amount(&mut self, amount: Decimal) {
        if self.editing("payment amount") {
            self.payment_amount = amount;
        }
    }

    /// Set the payment type
    pub fn set_payment_type(&mut self, payment_type: PaymentType) {
        if self.editing("payment type") {
            self.payment_type = Some(payment_type);
        }
    }

    /// Set the operator notes
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        if self.editing("notes") {
            self.notes = notes.into();
        }
    }

    /// Record the operator's confirmation that payment was received
    pub fn confirm(&mut self, confirmed: bool) {
        if self.editing("confirmation") {
            self.confirmed = confirmed;
        }
    }

    fn editing(&self, what: &str) -> bool {
        if self.state == FormState::Editing {
            true
        } else {
            warn!("Ignoring {} change outside the Editing state", what);
            false
        }
    }

    /// Canonical total: tendered payment plus applied credit, exact
    pub fn total_payment(&self) -> Decimal {
        self.payment_amount + self.credit_applied
    }

    /// Balance still owed after this payment, rounded once at the cent
    /// boundary so repeated partial payments cannot accumulate drift
    pub fn remaining_after_payment(&self, amount_owed: Decimal) -> Decimal {
        (amount_owed - self.total_payment()).round_dp(2)
    }

    /// Snapshot the form for submission
    ///
    /// `payment_notes` is `None` when the operator left it empty.
    pub fn build_payment_data(&self) -> PaymentData {
        PaymentData {
            payment_amount: self.payment_amount,
            payment_type: self.payment_type.clone(),
            payment_notes: if self.notes.is_empty() {
                None
            } else {
                Some(self.notes.clone())
            },
            credit_applied: self.credit_applied,
        }
    }

    /// Human-readable confirmation for a recorded payment
    ///
    /// `"Payment of {symbol}{total} recorded successfully"`, with the credit
    /// portion called out when any was applied, then any extra detail.
    pub fn format_success_message(&self, currency_symbol: &str, extra: Option<&str>) -> String {
        let mut message = format!(
            "Payment of {}{:.2} recorded successfully",
            currency_symbol,
            self.total_payment()
        );

        if self.credit_applied > Decimal::ZERO {
            message.push_str(&format!(
                " (including {}{:.2} credit)",
                currency_symbol, self.credit_applied
            ));
        }

        if let Some(extra) = extra {
            message.push(' ');
            message.push_str(extra);
        }

        message
    }

    /// Close out the workflow, returning the submission payload
    ///
    /// Requires the Editing state, operator confirmation, a non-negative
    /// tendered amount, and a credit amount that still passes validation
    /// against the given amount owed. On success the form transitions to
    /// Submitted and further edits are ignored.
    pub fn finalize(&mut self, amount_owed: Decimal) -> AppResult<PaymentData> {
        if self.state != FormState::Editing {
            return Err(AppError::InvalidState(format!(
                "cannot submit from {:?}",
                self.state
            )));
        }
        if !self.confirmed {
            return Err(AppError::Validation(
                "Payment must be confirmed before submission".to_string(),
            ));
        }
        if self.payment_amount < Decimal::ZERO {
            return Err(AppError::Validation(
                "Payment amount cannot be negative".to_string(),
            ));
        }
        self.validate_credit_amount(self.credit_applied, amount_owed)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.state = FormState::Submitted;
        Ok(self.build_payment_data())
    }

    /// Abandon the workflow and return every field to its Uninitialized
    /// default
    pub fn reset(&mut self) {
        self.payment_amount = Decimal::ZERO;
        self.credit_applied = Decimal::ZERO;
        self.payment_type = None;
        self.notes.clear();
        self.confirmed = false;
        self.balance = Decimal::ZERO;
        self.user_id = None;
        self.state = FormState::Uninitialized;
    }

    // ==================== Accessors ====================

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn payment_amount(&self) -> Decimal {
        self.payment_amount
    }

    pub fn credit_applied(&self) -> Decimal {
        self.credit_applied
    }

    pub fn payment_type(&self) -> Option<&PaymentType> {
        self.payment_type.as_ref()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Balance snapshot fetched at initialization
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Credit the operator may still offer: the non-negative balance
    pub fn max_credit_available(&self) -> Decimal {
        self.balance.max(Decimal::ZERO)
    }

    pub fn user_id(&self) -> Option<i32> {
        self.user_id
    }
}
