use tracing::debug;

use crate::config::BillingConfig;
use crate::core::sanitize::clamp_percent;
use crate::core::ValidationError;
use crate::modules::billing::services::{LineItemNormalizer, NormalizedItems, TotalsCalculator};
use crate::modules::bills::models::{BillAggregate, BillInputs};
use crate::modules::payments::services::{derive_balance, derive_status, PaymentLedger};

/// The recompute pipeline.
///
/// normalize items → totals → ledger aggregate → balance / status →
/// requested amount. Pure and synchronous: the same inputs always give
/// the same derived fields. Artifact generation happens afterwards in the
/// service; here a carried-over artifact is only kept if it still matches.
pub struct BillAggregateBuilder {
    normalizer: LineItemNormalizer,
    calculator: TotalsCalculator,
}

impl BillAggregateBuilder {
    pub fn new(config: &BillingConfig) -> Self {
        Self {
            normalizer: LineItemNormalizer::new(config),
            calculator: TotalsCalculator::new(),
        }
    }

    /// Full recompute with hand-off validation
    pub fn recompute_bill(&self, inputs: &BillInputs) -> Result<BillAggregate, ValidationError> {
        Self::validate_party(inputs)?;

        let (bill, normalized) = self.assemble(inputs)?;

        if normalized.is_empty() {
            return Err(ValidationError::NoBillableContent);
        }

        if !normalized.flagged.is_empty() {
            return Err(ValidationError::InvalidLineItem {
                items: normalized.flagged,
            });
        }

        Ok(bill)
    }

    /// Recompute without content validation, for live previews of a bill
    /// still being typed. Payment records are still checked.
    pub fn preview(&self, inputs: &BillInputs) -> Result<BillAggregate, ValidationError> {
        self.assemble(inputs).map(|(bill, _)| bill)
    }

    fn validate_party(inputs: &BillInputs) -> Result<(), ValidationError> {
        if inputs.customer_name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "customer_name",
            });
        }

        if inputs.customer_contact.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "customer_contact",
            });
        }

        Ok(())
    }

    fn assemble(
        &self,
        inputs: &BillInputs,
    ) -> Result<(BillAggregate, NormalizedItems), ValidationError> {
        let normalized = self.normalizer.normalize(&inputs.items);

        let breakdown = inputs.breakdown.sanitized();
        let tax_rate_percent = clamp_percent(inputs.tax_rate_percent);
        let totals = self.calculator.calculate(
            &normalized.items,
            &breakdown,
            tax_rate_percent,
            &inputs.discount,
        );

        let ledger = PaymentLedger::from_records(inputs.payment_records.clone())?;
        let received = ledger.aggregate_with_fallback(inputs.manual_paid_amount);

        let balance = derive_balance(totals.total_amount, received.paid_amount);
        let status = derive_status(totals.total_amount, received.paid_amount);
        let requested_payment_amount = inputs.requested_payment.resolve(balance);

        let mut bill = BillAggregate {
            bill_id: inputs.bill_id.trim().to_string(),
            internal_id: inputs.internal_id.clone(),
            customer_name: inputs.customer_name.trim().to_string(),
            customer_contact: inputs.customer_contact.trim().to_string(),
            line_items: normalized.items.clone(),
            breakdown,
            tax_rate_percent,
            discount: inputs.discount,
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            discount_amount: totals.discount_amount,
            total_amount: totals.total_amount,
            paid_amount: received.paid_amount,
            cash_received: received.cash_received,
            online_received: received.online_received,
            balance,
            status,
            payment_records: ledger.into_records(),
            manual_paid_amount: inputs.manual_paid_amount,
            requested_payment: inputs.requested_payment,
            requested_payment_amount,
            payee: inputs.payee.clone(),
            note: inputs.note.clone(),
            payment_artifact: None,
            created_at: inputs.created_at,
            updated_at: None,
        };

        let key = bill.artifact_key();
        bill.payment_artifact = inputs
            .payment_artifact
            .clone()
            .filter(|artifact| artifact.key == key);

        debug!(
            "Recomputed bill {}: total {} paid {} balance {} ({})",
            bill.bill_id, bill.total_amount, bill.paid_amount, bill.balance, bill.status
        );

        Ok((bill, normalized))
    }
}
