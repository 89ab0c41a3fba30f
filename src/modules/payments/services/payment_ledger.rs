use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::ValidationError;
use crate::modules::payments::models::{PaymentMethod, PaymentRecord};

/// Aggregate of everything received against a bill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub paid_amount: Decimal,
    pub cash_received: Decimal,
    pub online_received: Decimal,
}

/// Ordered list of payments; the only source of `paid_amount` once it
/// holds a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentLedger {
    records: Vec<PaymentRecord>,
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger, validating every record in order
    pub fn from_records(records: Vec<PaymentRecord>) -> Result<Self, ValidationError> {
        let mut ledger = Self::new();
        for record in records {
            ledger.add_record(record)?;
        }
        Ok(ledger)
    }

    /// Append a payment.
    ///
    /// Rejects non-positive amounts, duplicate ids, and split records
    /// whose portions are negative or do not sum exactly to the amount.
    pub fn add_record(&mut self, record: PaymentRecord) -> Result<(), ValidationError> {
        Self::validate_record(&record)?;

        if self.records.iter().any(|r| r.id == record.id) {
            return Err(ValidationError::DuplicatePayment {
                record_id: record.id,
            });
        }

        self.records.push(record);
        Ok(())
    }

    /// Remove a payment by id, returning it if present
    pub fn remove_record(&mut self, record_id: &str) -> Option<PaymentRecord> {
        let index = self.records.iter().position(|r| r.id == record_id)?;
        Some(self.records.remove(index))
    }

    pub fn validate_record(record: &PaymentRecord) -> Result<(), ValidationError> {
        if record.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePayment {
                record_id: record.id.clone(),
                amount: record.amount,
            });
        }

        if let PaymentMethod::Split {
            cash_portion,
            online_portion,
        } = record.method
        {
            let portions_valid = cash_portion >= Decimal::ZERO
                && online_portion >= Decimal::ZERO
                && cash_portion.checked_add(online_portion) == Some(record.amount);

            if !portions_valid {
                return Err(ValidationError::InconsistentSplitPayment {
                    record_id: record.id.clone(),
                    amount: record.amount,
                    cash_portion,
                    online_portion,
                });
            }
        }

        Ok(())
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PaymentRecord> {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fold all records into paid / cash / online totals
    pub fn aggregate(&self) -> LedgerTotals {
        self.records
            .iter()
            .fold(LedgerTotals::default(), |mut totals, record| {
                totals.paid_amount = totals.paid_amount.saturating_add(record.amount);
                totals.cash_received = totals.cash_received.saturating_add(record.cash_part());
                totals.online_received =
                    totals.online_received.saturating_add(record.online_part());
                totals
            })
    }

    /// Totals with a manually entered paid figure as fallback.
    ///
    /// The manual figure only applies to an empty ledger (bills imported
    /// before payments were itemized). It is ignored, with a warning,
    /// whenever records exist.
    pub fn aggregate_with_fallback(&self, manual_paid: Option<Decimal>) -> LedgerTotals {
        let totals = self.aggregate();

        match manual_paid {
            Some(manual) if self.is_empty() => LedgerTotals {
                paid_amount: manual.max(Decimal::ZERO),
                ..totals
            },
            Some(manual) if manual != totals.paid_amount => {
                warn!(
                    "Ignoring manual paid amount {} in favour of ledger total {}",
                    manual, totals.paid_amount
                );
                totals
            }
            _ => totals,
        }
    }
}
