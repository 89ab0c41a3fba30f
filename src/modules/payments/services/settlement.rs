// Status and balance derivation
//
// Both functions are total over non-negative inputs. Overpayment never
// produces a negative balance; refunds are handled outside the billing core.

use rust_decimal::Decimal;

use crate::modules::payments::models::BillStatus;

/// Outstanding amount: max(0, total − paid)
pub fn derive_balance(total_amount: Decimal, paid_amount: Decimal) -> Decimal {
    total_amount.saturating_sub(paid_amount).max(Decimal::ZERO)
}

/// unpaid when nothing was received, paid once paid ≥ total, partial otherwise.
///
/// A zero-total bill with nothing received is `Unpaid`.
pub fn derive_status(total_amount: Decimal, paid_amount: Decimal) -> BillStatus {
    if paid_amount <= Decimal::ZERO {
        BillStatus::Unpaid
    } else if paid_amount >= total_amount {
        BillStatus::Paid
    } else {
        BillStatus::Partial
    }
}
