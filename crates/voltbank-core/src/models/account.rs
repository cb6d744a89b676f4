//! User account model
//!
//! A user's prepaid/credit balance and its transaction history. A negative
//! balance denotes debt; a positive balance is credit available to apply
//! toward new payment obligations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's account balance snapshot
///
/// Fetched fresh per settlement workflow, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Owning user
    pub user_id: i32,

    /// Signed balance at cents precision
    pub balance: Decimal,

    /// Last server-side update, when reported
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserAccount {
    /// Credit that can be drawn toward a payment; debt contributes nothing
    pub fn available_credit(&self) -> Decimal {
        self.balance.max(Decimal::ZERO)
    }

    /// True when the balance is below zero
    pub fn is_in_debt(&self) -> bool {
        self.balance < Decimal::ZERO
    }
}

/// Account transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Charge raised when a rental closes
    RentalCharge,
    /// Payment received from the user
    Payment,
    /// Account credit drawn down against an obligation
    CreditApplied,
    /// Manual correction
    Adjustment,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::RentalCharge => write!(f, "rental_charge"),
            TransactionType::Payment => write!(f, "payment"),
            TransactionType::CreditApplied => write!(f, "credit_applied"),
            TransactionType::Adjustment => write!(f, "adjustment"),
        }
    }
}

/// A single ledger movement on a user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountTransaction {
    pub id: i64,
    pub user_id: i32,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_available_credit_clamps_debt() {
        let account = UserAccount {
            user_id: 1,
            balance: dec!(-42.50),
            updated_at: None,
        };
        assert!(account.is_in_debt());
        assert_eq!(account.available_credit(), Decimal::ZERO);

        let account = UserAccount {
            user_id: 1,
            balance: dec!(30),
            updated_at: None,
        };
        assert!(!account.is_in_debt());
        assert_eq!(account.available_credit(), dec!(30));
    }

    #[test]
    fn test_transaction_type_wire_format() {
        let json = serde_json::to_string(&TransactionType::RentalCharge).unwrap();
        assert_eq!(json, r#""rental_charge""#);

        let parsed: TransactionType = serde_json::from_str(r#""credit_applied""#).unwrap();
        assert_eq!(parsed, TransactionType::CreditApplied);
    }
}
