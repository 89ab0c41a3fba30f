// Payment ledger aggregation and record validation

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tailor_billing::core::ValidationError;
use tailor_billing::modules::payments::models::{PaymentMethod, PaymentRecord};
use tailor_billing::modules::payments::services::PaymentLedger;

fn rupees(paise: u64) -> Decimal {
    Decimal::new(paise as i64, 2)
}

proptest! {
    #[test]
    fn test_cash_plus_online_equals_paid(
        payments in prop::collection::vec((1u64..1_000_000u64, 0u8..3u8, 0u64..=100u64), 0..12)
    ) {
        let records: Vec<PaymentRecord> = payments
            .iter()
            .map(|(paise, method, share)| {
                let amount = rupees(*paise);
                match method {
                    0 => PaymentRecord::cash(amount),
                    1 => PaymentRecord::online(amount),
                    _ => {
                        let cash = (amount * Decimal::from(*share) / Decimal::ONE_HUNDRED).round_dp(2);
                        PaymentRecord::split(amount, cash, amount - cash)
                    }
                }
            })
            .collect();

        let expected: Decimal = records.iter().map(|r| r.amount).sum();
        let ledger = PaymentLedger::from_records(records).unwrap();
        let totals = ledger.aggregate();

        prop_assert_eq!(totals.paid_amount, expected);
        prop_assert_eq!(totals.cash_received + totals.online_received, totals.paid_amount);
    }

    #[test]
    fn test_aggregate_is_order_independent(
        amounts in prop::collection::vec(1u64..1_000_000u64, 1..8)
    ) {
        let records: Vec<PaymentRecord> = amounts.iter().map(|p| PaymentRecord::cash(rupees(*p))).collect();
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = PaymentLedger::from_records(records).unwrap().aggregate();
        let backward = PaymentLedger::from_records(reversed).unwrap().aggregate();

        prop_assert_eq!(forward, backward);
    }
}

#[test]
fn test_mixed_methods_totals() {
    let ledger = PaymentLedger::from_records(vec![
        PaymentRecord::cash(dec!(500)),
        PaymentRecord::online(dec!(250.50)),
        PaymentRecord::split(dec!(1000), dec!(400), dec!(600)),
    ])
    .unwrap();

    let totals = ledger.aggregate();
    assert_eq!(totals.paid_amount, dec!(1750.50));
    assert_eq!(totals.cash_received, dec!(900));
    assert_eq!(totals.online_received, dec!(850.50));
}

#[test]
fn test_split_must_sum_exactly() {
    let mut ledger = PaymentLedger::new();
    let err = ledger
        .add_record(PaymentRecord::split(dec!(1000), dec!(400), dec!(599.99)))
        .unwrap_err();

    assert!(matches!(
        err,
        ValidationError::InconsistentSplitPayment { amount, .. } if amount == dec!(1000)
    ));
    assert!(ledger.is_empty());
}

#[test]
fn test_split_portions_cannot_be_negative() {
    let record = PaymentRecord::split(dec!(100), dec!(150), dec!(-50));
    assert!(PaymentLedger::validate_record(&record).is_err());
}

#[test]
fn test_non_positive_amount_rejected() {
    let err = PaymentLedger::validate_record(&PaymentRecord::cash(Decimal::ZERO)).unwrap_err();
    assert!(matches!(err, ValidationError::NonPositivePayment { .. }));
}

#[test]
fn test_duplicate_record_rejected() {
    let record = PaymentRecord::online(dec!(300));
    let mut ledger = PaymentLedger::new();
    ledger.add_record(record.clone()).unwrap();

    let err = ledger.add_record(record).unwrap_err();
    assert!(matches!(err, ValidationError::DuplicatePayment { .. }));
    assert_eq!(ledger.records().len(), 1);
}

#[test]
fn test_remove_record() {
    let first = PaymentRecord::cash(dec!(200)).with_notes("advance at fitting");
    let second = PaymentRecord::online(dec!(300));
    let mut ledger = PaymentLedger::from_records(vec![first.clone(), second]).unwrap();

    let removed = ledger.remove_record(&first.id).unwrap();
    assert_eq!(removed.notes.as_deref(), Some("advance at fitting"));
    assert!(ledger.remove_record("missing").is_none());
    assert_eq!(ledger.aggregate().paid_amount, dec!(300));
}

#[test]
fn test_manual_paid_only_for_empty_ledger() {
    let empty = PaymentLedger::new();
    let totals = empty.aggregate_with_fallback(Some(dec!(450)));
    assert_eq!(totals.paid_amount, dec!(450));
    assert_eq!(totals.cash_received, Decimal::ZERO);

    let ledger = PaymentLedger::from_records(vec![PaymentRecord::cash(dec!(100))]).unwrap();
    assert_eq!(ledger.aggregate_with_fallback(Some(dec!(450))).paid_amount, dec!(100));
}

#[test]
fn test_record_deserializes_with_defaults() {
    let record: PaymentRecord = serde_json::from_str(
        r#"{ "amount": "750", "method": { "type": "split", "cash_portion": "250", "online_portion": 500 } }"#,
    )
    .unwrap();

    assert!(!record.id.is_empty());
    assert_eq!(
        record.method,
        PaymentMethod::Split {
            cash_portion: dec!(250),
            online_portion: dec!(500),
        }
    );
    assert!(PaymentLedger::validate_record(&record).is_ok());
}
