//! Payment types and submission payload

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a payment was tendered
///
/// Hubs can configure additional types server-side, so unknown strings
/// round-trip through `Other` instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentType {
    Cash,
    MobileMoney,
    Card,
    Other(String),
}

impl PaymentType {
    /// Wire representation (kebab-case)
    pub fn as_str(&self) -> &str {
        match self {
            PaymentType::Cash => "cash",
            PaymentType::MobileMoney => "mobile-money",
            PaymentType::Card => "card",
            PaymentType::Other(s) => s,
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for PaymentType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "cash" => PaymentType::Cash,
            "mobile-money" => PaymentType::MobileMoney,
            "card" => PaymentType::Card,
            _ => PaymentType::Other(s),
        }
    }
}

impl From<PaymentType> for String {
    fn from(t: PaymentType) -> Self {
        t.as_str().to_string()
    }
}

/// Payment submission payload
///
/// Built by the settlement engine and POSTed by the caller to the
/// rentals/accounts API. `payment_notes` is `None` when the operator left
/// the field empty, never an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentData {
    pub payment_amount: Decimal,
    pub payment_type: Option<PaymentType>,
    pub payment_notes: Option<String>,
    pub credit_applied: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_type_round_trip() {
        for (wire, expected) in [
            ("cash", PaymentType::Cash),
            ("mobile-money", PaymentType::MobileMoney),
            ("card", PaymentType::Card),
            ("bank-transfer", PaymentType::Other("bank-transfer".to_string())),
        ] {
            let parsed: PaymentType = serde_json::from_str(&format!("\"{}\"", wire)).unwrap();
            assert_eq!(parsed, expected);
            assert_eq!(serde_json::to_string(&parsed).unwrap(), format!("\"{}\"", wire));
        }
    }

    #[test]
    fn test_payment_data_serializes_null_notes() {
        let data = PaymentData {
            payment_amount: dec!(15),
            payment_type: Some(PaymentType::Cash),
            payment_notes: None,
            credit_applied: dec!(0),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert!(json["payment_notes"].is_null());
        assert_eq!(json["payment_type"], "cash");
    }
}
