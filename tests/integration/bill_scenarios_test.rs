// End-to-end billing scenarios through the recompute pipeline
//
// Each scenario saves a bill, applies the kind of edit an operator makes
// at the counter, and checks every derived figure plus whether the payment
// artifact was regenerated.

#[path = "../helpers/mod.rs"]
mod helpers;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use helpers::*;
use tailor_billing::modules::artifacts::models::{PaymentNote, RequestedAmount};
use tailor_billing::modules::billing::models::{ChargeBreakdown, Discount};
use tailor_billing::modules::payments::models::{BillStatus, PaymentRecord};

#[tokio::test]
async fn test_simple_bill_is_unpaid_with_full_link() {
    let encoder = CountingEncoder::new();
    let service = service_with(seeded_store().await, encoder.clone());

    let bill = service.save(shirt_bill()).await.unwrap();

    assert_eq!(bill.bill_id, "BILL-0001");
    assert_eq!(bill.subtotal, dec!(1000));
    assert_eq!(bill.tax_amount, dec!(100));
    assert_eq!(bill.total_amount, dec!(1100));
    assert_eq!(bill.paid_amount, Decimal::ZERO);
    assert_eq!(bill.balance, dec!(1100));
    assert_eq!(bill.status, BillStatus::Unpaid);
    assert_eq!(bill.requested_payment_amount, dec!(1100));

    let artifact = bill.payment_artifact.as_ref().unwrap();
    assert!(artifact.deep_link.starts_with("upi://pay?pa=stitchwell%40upi&pn=Stitchwell%20Tailors"));
    assert!(artifact.deep_link.contains("&am=1100.00&cu=INR"));
    assert!(artifact.deep_link.ends_with("&tr=BILL-0001"));
    assert!(artifact.scannable_code_image.is_some());
    assert_eq!(encoder.calls(), 1);
}

#[tokio::test]
async fn test_partial_payment_moves_requested_amount() {
    let encoder = CountingEncoder::new();
    let service = service_with(seeded_store().await, encoder.clone());
    let saved = service.save(shirt_bill()).await.unwrap();
    let id = saved.internal_id.clone().unwrap();

    let bill = service
        .record_payment(&id, PaymentRecord::cash(dec!(400)))
        .await
        .unwrap();

    assert_eq!(bill.paid_amount, dec!(400));
    assert_eq!(bill.cash_received, dec!(400));
    assert_eq!(bill.balance, dec!(700));
    assert_eq!(bill.status, BillStatus::Partial);
    assert_eq!(bill.requested_payment_amount, dec!(700));
    assert!(bill.payment_artifact.unwrap().deep_link.contains("&am=700.00&"));
    assert_eq!(encoder.calls(), 2);
}

#[tokio::test]
async fn test_split_payment_settles_bill() {
    let service = service_with(seeded_store().await, CountingEncoder::new());
    let saved = service.save(shirt_bill()).await.unwrap();
    let id = saved.internal_id.unwrap();

    service
        .record_payment(&id, PaymentRecord::online(dec!(100)))
        .await
        .unwrap();
    let bill = service
        .record_payment(&id, PaymentRecord::split(dec!(1000), dec!(350), dec!(650)))
        .await
        .unwrap();

    assert_eq!(bill.paid_amount, dec!(1100));
    assert_eq!(bill.cash_received, dec!(350));
    assert_eq!(bill.online_received, dec!(750));
    assert_eq!(bill.balance, Decimal::ZERO);
    assert_eq!(bill.status, BillStatus::Paid);
    assert_eq!(bill.payment_records.len(), 2);
}

#[tokio::test]
async fn test_removing_payment_reopens_bill() {
    let service = service_with(seeded_store().await, CountingEncoder::new());
    let id = service.save(shirt_bill()).await.unwrap().internal_id.unwrap();

    let payment = PaymentRecord::online(dec!(1100));
    let paid = service.record_payment(&id, payment.clone()).await.unwrap();
    assert_eq!(paid.status, BillStatus::Paid);

    let reopened = service.remove_payment(&id, &payment.id).await.unwrap();
    assert_eq!(reopened.status, BillStatus::Unpaid);
    assert_eq!(reopened.balance, dec!(1100));
    assert!(reopened.payment_records.is_empty());
}

#[tokio::test]
async fn test_pinned_amount_keeps_artifact_stable() {
    let encoder = CountingEncoder::new();
    let service = service_with(seeded_store().await, encoder.clone());
    let id = service.save(shirt_bill()).await.unwrap().internal_id.unwrap();

    let pinned = service.pin_requested_amount(&id, dec!(500)).await.unwrap();
    assert_eq!(pinned.requested_payment_amount, dec!(500));
    assert_eq!(encoder.calls(), 2);

    // Balance moves, the pinned request does not
    let paid = service
        .record_payment(&id, PaymentRecord::cash(dec!(200)))
        .await
        .unwrap();
    assert_eq!(paid.balance, dec!(900));
    assert_eq!(paid.requested_payment_amount, dec!(500));
    assert_eq!(encoder.calls(), 2);

    let following = service.follow_balance(&id).await.unwrap();
    assert_eq!(following.requested_payment, RequestedAmount::Auto);
    assert_eq!(following.requested_payment_amount, dec!(900));
    assert_eq!(encoder.calls(), 3);
}

#[tokio::test]
async fn test_note_edit_does_not_regenerate() {
    let encoder = CountingEncoder::new();
    let service = service_with(seeded_store().await, encoder.clone());
    let saved = service.save(shirt_bill()).await.unwrap();

    let mut inputs = saved.to_inputs();
    inputs.note = PaymentNote {
        order_name: Some("Office shirts".to_string()),
        ..PaymentNote::default()
    };

    let updated = service
        .update(saved.internal_id.as_deref().unwrap(), inputs)
        .await
        .unwrap();

    assert_eq!(encoder.calls(), 1);
    assert_eq!(updated.payment_artifact, saved.payment_artifact);
}

#[tokio::test]
async fn test_recompute_is_idempotent() {
    let encoder = CountingEncoder::new();
    let service = service_with(seeded_store().await, encoder.clone());

    let mut inputs = shirt_bill();
    inputs.bill_id = "BILL-0042".to_string();
    inputs.breakdown = ChargeBreakdown {
        accessories_charges: dec!(120),
        ..ChargeBreakdown::default()
    };
    inputs.discount = Discount::percentage(dec!(5));
    inputs.payment_records = vec![PaymentRecord::cash(dec!(300))];

    let first = service.recompute(inputs).await.unwrap();
    let second = service.recompute(first.to_inputs()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.subtotal, dec!(1120));
    assert_eq!(first.discount_amount, dec!(56));
    assert_eq!(first.total_amount, dec!(1176));
    assert_eq!(encoder.calls(), 1);
}

#[tokio::test]
async fn test_manual_paid_amount_on_imported_bill() {
    let service = service_with(seeded_store().await, CountingEncoder::new());

    let mut inputs = shirt_bill();
    inputs.manual_paid_amount = Some(dec!(600));
    let bill = service.save(inputs).await.unwrap();

    assert_eq!(bill.paid_amount, dec!(600));
    assert_eq!(bill.cash_received, Decimal::ZERO);
    assert_eq!(bill.status, BillStatus::Partial);

    // Itemized payments take over from the manual figure
    let id = bill.internal_id.unwrap();
    let itemized = service
        .record_payment(&id, PaymentRecord::cash(dec!(100)))
        .await
        .unwrap();
    assert_eq!(itemized.paid_amount, dec!(100));
}

#[tokio::test]
async fn test_tax_rate_is_clamped() {
    let service = service_with(seeded_store().await, CountingEncoder::new());

    let mut inputs = shirt_bill();
    inputs.tax_rate_percent = dec!(250);
    let bill = service.recompute(inputs).await.unwrap();

    assert_eq!(bill.tax_rate_percent, dec!(100));
    assert_eq!(bill.total_amount, dec!(2000));
}

#[tokio::test]
async fn test_cleared_manual_paid_amount_stays_cleared() {
    let service = service_with(seeded_store().await, CountingEncoder::new());

    let mut inputs = shirt_bill();
    inputs.manual_paid_amount = Some(dec!(600));
    let saved = service.save(inputs).await.unwrap();
    let id = saved.internal_id.clone().unwrap();

    let mut cleared = saved.to_inputs();
    cleared.manual_paid_amount = None;
    let updated = service.update(&id, cleared).await.unwrap();
    assert_eq!(updated.paid_amount, Decimal::ZERO);

    let stored = service.get(&id).await.unwrap();
    assert_eq!(stored.manual_paid_amount, None);
    assert_eq!(stored.paid_amount, Decimal::ZERO);

    // A later edit recomputes from what was stored
    let pinned = service.pin_requested_amount(&id, dec!(500)).await.unwrap();
    assert_eq!(pinned.paid_amount, Decimal::ZERO);
    assert_eq!(pinned.balance, dec!(1100));
    assert_eq!(pinned.status, BillStatus::Unpaid);
}

#[tokio::test]
async fn test_other_charges_edit_moves_auto_request() {
    let encoder = CountingEncoder::new();
    let service = service_with(seeded_store().await, encoder.clone());
    let saved = service.save(shirt_bill()).await.unwrap();
    let id = saved.internal_id.clone().unwrap();

    let mut inputs = saved.to_inputs();
    inputs.breakdown.other_charges = dec!(200);
    let bill = service.update(&id, inputs).await.unwrap();

    // (1000 + 200) + 10% tax
    assert_eq!(bill.total_amount, dec!(1320));
    assert_eq!(bill.requested_payment_amount, dec!(1320));
    assert!(bill.payment_artifact.unwrap().deep_link.contains("&am=1320.00&"));
    assert_eq!(encoder.calls(), 2);
}

#[tokio::test]
async fn test_other_charges_edit_keeps_pinned_request() {
    let encoder = CountingEncoder::new();
    let service = service_with(seeded_store().await, encoder.clone());
    let id = service.save(shirt_bill()).await.unwrap().internal_id.unwrap();

    let pinned = service.pin_requested_amount(&id, dec!(500)).await.unwrap();
    assert_eq!(encoder.calls(), 2);

    let mut inputs = pinned.to_inputs();
    inputs.breakdown.other_charges = dec!(300);
    let bill = service.update(&id, inputs).await.unwrap();

    assert_eq!(bill.total_amount, dec!(1430));
    assert_eq!(bill.balance, dec!(1430));
    assert_eq!(bill.requested_payment_amount, dec!(500));
    assert_eq!(bill.payment_artifact, pinned.payment_artifact);
    assert!(bill.payment_artifact.unwrap().deep_link.contains("&am=500.00&"));
    assert_eq!(encoder.calls(), 2);
}
