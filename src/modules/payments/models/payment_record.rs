// Payment records
//
// One settlement event against a bill. Split payments carry both portions
// explicitly; the ledger checks they add up rather than fixing them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::sanitize::decimal_or_zero;

/// How a payment was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Online,
    Split {
        #[serde(default, deserialize_with = "decimal_or_zero")]
        cash_portion: Decimal,
        #[serde(default, deserialize_with = "decimal_or_zero")]
        online_portion: Decimal,
    },
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Online => write!(f, "online"),
            PaymentMethod::Split { .. } => write!(f, "split"),
        }
    }
}

/// A single payment against a bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(default = "new_record_id")]
    pub id: String,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub amount: Decimal,

    pub method: PaymentMethod,

    #[serde(default = "Utc::now")]
    pub recorded_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

impl PaymentRecord {
    pub fn cash(amount: Decimal) -> Self {
        Self::with_method(amount, PaymentMethod::Cash)
    }

    pub fn online(amount: Decimal) -> Self {
        Self::with_method(amount, PaymentMethod::Online)
    }

    pub fn split(amount: Decimal, cash_portion: Decimal, online_portion: Decimal) -> Self {
        Self::with_method(
            amount,
            PaymentMethod::Split {
                cash_portion,
                online_portion,
            },
        )
    }

    fn with_method(amount: Decimal, method: PaymentMethod) -> Self {
        Self {
            id: new_record_id(),
            amount,
            method,
            recorded_at: Utc::now(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Portion received in cash
    pub fn cash_part(&self) -> Decimal {
        match self.method {
            PaymentMethod::Cash => self.amount,
            PaymentMethod::Online => Decimal::ZERO,
            PaymentMethod::Split { cash_portion, .. } => cash_portion,
        }
    }

    /// Portion received online
    pub fn online_part(&self) -> Decimal {
        match self.method {
            PaymentMethod::Cash => Decimal::ZERO,
            PaymentMethod::Online => self.amount,
            PaymentMethod::Split { online_portion, .. } => online_portion,
        }
    }
}
