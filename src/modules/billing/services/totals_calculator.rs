use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::sanitize::{clamp_percent, non_negative};
use crate::modules::billing::models::{ChargeBreakdown, Discount, LineItem};

/// Derived money figures of a bill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
}

/// Pure subtotal / tax / discount / total computation.
///
/// Inputs are re-sanitized on entry so the result is defined for any
/// caller, including a live summary panel fed straight from a form.
pub struct TotalsCalculator;

impl TotalsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// subtotal = Σ item amounts + Σ breakdown charges
    /// tax      = subtotal × rate / 100
    /// total    = max(0, subtotal + tax − discount)
    pub fn calculate(
        &self,
        items: &[LineItem],
        breakdown: &ChargeBreakdown,
        tax_rate_percent: Decimal,
        discount: &Discount,
    ) -> BillTotals {
        let subtotal = items
            .iter()
            .fold(breakdown.total(), |sum, item| sum.saturating_add(non_negative(item.amount)));

        let tax_amount =
            subtotal.saturating_mul(clamp_percent(tax_rate_percent)) / Decimal::ONE_HUNDRED;
        let discount_amount = discount.amount_for(subtotal);
        let total_amount = non_negative(subtotal.saturating_add(tax_amount) - discount_amount);

        BillTotals {
            subtotal,
            tax_amount,
            discount_amount,
            total_amount,
        }
    }
}

impl Default for TotalsCalculator {
    fn default() -> Self {
        Self::new()
    }
}
