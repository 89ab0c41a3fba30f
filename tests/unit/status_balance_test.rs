// Status and balance derivation

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tailor_billing::modules::artifacts::models::RequestedAmount;
use tailor_billing::modules::payments::models::BillStatus;
use tailor_billing::modules::payments::services::{derive_balance, derive_status};

proptest! {
    #[test]
    fn test_balance_never_negative(total in 0u64..10_000_000u64, paid in 0u64..20_000_000u64) {
        let total = Decimal::new(total as i64, 2);
        let paid = Decimal::new(paid as i64, 2);

        let balance = derive_balance(total, paid);
        prop_assert!(balance >= Decimal::ZERO);
        prop_assert_eq!(balance, (total - paid).max(Decimal::ZERO));
    }

    #[test]
    fn test_status_matches_paid_fraction(total in 1u64..10_000_000u64, paid in 0u64..20_000_000u64) {
        let total = Decimal::new(total as i64, 2);
        let paid = Decimal::new(paid as i64, 2);

        let expected = if paid.is_zero() {
            BillStatus::Unpaid
        } else if paid >= total {
            BillStatus::Paid
        } else {
            BillStatus::Partial
        };

        prop_assert_eq!(derive_status(total, paid), expected);
    }
}

#[test]
fn test_exact_payment_is_paid_with_zero_balance() {
    assert_eq!(derive_status(dec!(1100), dec!(1100)), BillStatus::Paid);
    assert_eq!(derive_balance(dec!(1100), dec!(1100)), Decimal::ZERO);
}

#[test]
fn test_overpayment_floors_balance() {
    assert_eq!(derive_balance(dec!(500), dec!(650)), Decimal::ZERO);
    assert_eq!(derive_status(dec!(500), dec!(650)), BillStatus::Paid);
}

#[test]
fn test_one_paisa_short_is_partial() {
    assert_eq!(derive_status(dec!(1000), dec!(999.99)), BillStatus::Partial);
    assert_eq!(derive_balance(dec!(1000), dec!(999.99)), dec!(0.01));
}

#[test]
fn test_status_round_trips_through_text() {
    for status in [BillStatus::Unpaid, BillStatus::Partial, BillStatus::Paid] {
        assert_eq!(status.to_string().parse::<BillStatus>().unwrap(), status);
    }
}

#[test]
fn test_requested_amount_modes() {
    assert_eq!(RequestedAmount::Auto.resolve(dec!(612.50)), dec!(612.50));
    assert_eq!(RequestedAmount::pinned(dec!(300)).resolve(dec!(612.50)), dec!(300));
    assert_eq!(RequestedAmount::pinned(dec!(-5)).resolve(dec!(10)), Decimal::ZERO);
    assert!(RequestedAmount::default().is_auto());
}
