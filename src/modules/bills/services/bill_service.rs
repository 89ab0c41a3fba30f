use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::{BillingConfig, PayeeConfig};
use crate::core::traits::{
    PersistenceStore, ScannableCodeEncoder, SequenceAllocator, SettingsProvider,
};
use crate::core::{AppError, Result};
use crate::modules::artifacts::models::{PayeeDetails, PaymentNote, RequestedAmount};
use crate::modules::artifacts::services::PaymentArtifactGenerator;
use crate::modules::billing::models::{LineItemInput, LineItemKind, LineItemSource, SourceRef};
use crate::modules::bills::models::{BillAggregate, BillInputs, OrderEntry};
use crate::modules::bills::repositories::{
    fallback_bill_identifier, BillRepository, CatalogRepository, StoreSequenceAllocator,
    StoreSettingsProvider,
};
use crate::modules::bills::services::BillAggregateBuilder;
use crate::modules::payments::models::PaymentRecord;
use crate::modules::payments::services::PaymentLedger;

/// Bill lifecycle on top of the recompute pipeline.
///
/// Every mutation loads the stored bill, turns it back into inputs, applies
/// the change there and recomputes; derived fields are never patched.
pub struct BillService {
    builder: BillAggregateBuilder,
    artifacts: PaymentArtifactGenerator,
    bills: BillRepository,
    catalog: CatalogRepository,
    settings: Arc<dyn SettingsProvider>,
    sequence: Arc<dyn SequenceAllocator>,
    default_payee: PayeeDetails,
    bill_number_prefix: String,
}

impl BillService {
    pub fn new(
        store: Arc<dyn PersistenceStore>,
        settings: Arc<dyn SettingsProvider>,
        sequence: Arc<dyn SequenceAllocator>,
        encoder: Arc<dyn ScannableCodeEncoder>,
        billing: &BillingConfig,
        payee: &PayeeConfig,
    ) -> Self {
        Self {
            builder: BillAggregateBuilder::new(billing),
            artifacts: PaymentArtifactGenerator::new(encoder, payee.currency.clone()),
            bills: BillRepository::new(store.clone()),
            catalog: CatalogRepository::new(store),
            settings,
            sequence,
            default_payee: PayeeDetails::from(payee),
            bill_number_prefix: billing.bill_number_prefix.clone(),
        }
    }

    /// Wire settings and bill numbering to the same store as the bills
    pub fn with_store(
        store: Arc<dyn PersistenceStore>,
        encoder: Arc<dyn ScannableCodeEncoder>,
        billing: &BillingConfig,
        payee: &PayeeConfig,
    ) -> Self {
        let settings = Arc::new(StoreSettingsProvider::new(store.clone()));
        let sequence = Arc::new(StoreSequenceAllocator::new(
            store.clone(),
            billing.bill_number_prefix.clone(),
            billing.bill_number_width,
        ));
        Self::new(store, settings, sequence, encoder, billing, payee)
    }

    /// Payee from settings, with each missing field taken from the configured default
    async fn payee(&self) -> PayeeDetails {
        match self.settings.payment_payee_details().await {
            Ok(payee) => {
                if !payee.is_complete() {
                    warn!("Payee settings incomplete, filling blank fields from configured default");
                }
                payee.or_defaults(&self.default_payee)
            }
            Err(e) => {
                warn!("Payee settings unavailable ({}), using configured default", e);
                self.default_payee.clone()
            }
        }
    }

    /// Next bill number, or a timestamp-derived one
    async fn allocate_bill_id(&self) -> String {
        match self.sequence.next_bill_identifier().await {
            Ok(id) => id,
            Err(e) => {
                let id = fallback_bill_identifier(&self.bill_number_prefix, Utc::now());
                warn!("Bill number allocation failed ({}), using {}", e, id);
                id
            }
        }
    }

    /// Empty inputs for a new bill
    pub async fn new_draft(
        &self,
        customer_name: impl Into<String>,
        customer_contact: impl Into<String>,
    ) -> BillInputs {
        BillInputs {
            customer_name: customer_name.into(),
            customer_contact: customer_contact.into(),
            ..BillInputs::new(self.allocate_bill_id().await, self.payee().await)
        }
    }

    /// Pre-populate a bill from a stored order, pricing each entry from the catalog
    pub async fn draft_from_order(&self, order_id: &str) -> Result<BillInputs> {
        let order = self
            .catalog
            .find_order(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {}", order_id)))?;

        let mut items = Vec::with_capacity(order.entries.len());
        for (index, entry) in order.entries.iter().enumerate() {
            items.push(self.convert_entry(entry, index).await?);
        }

        info!(
            "Drafting bill from order {} with {} item(s)",
            order.id,
            items.len()
        );

        let mut draft = self
            .new_draft(order.customer_name.clone(), order.customer_contact.clone())
            .await;
        draft.items = LineItemSource::Flat(items);
        draft.note = PaymentNote {
            order_name: order.order_name,
            recipient: order.recipient,
            order_id: Some(order.id),
            delivery_date: order.delivery_date,
        };

        Ok(draft)
    }

    async fn convert_entry(&self, entry: &OrderEntry, index: usize) -> Result<LineItemInput> {
        let own_description = entry.description.trim();
        let mut item = LineItemInput {
            id: Some(format!("item-{}", index + 1)),
            kind: LineItemKind::CustomWork,
            source_ref: entry.source_ref.clone(),
            description: own_description.to_string(),
            quantity: entry.quantity,
            unit_rate: entry.unit_rate,
            unit_cost: Decimal::ZERO,
        };

        // An explicit rate on the order entry overrides the catalog rate
        let catalog_rate = |rate: Decimal| {
            if entry.unit_rate.is_zero() {
                rate
            } else {
                entry.unit_rate
            }
        };

        match &entry.source_ref {
            Some(SourceRef::Inventory(id)) => {
                item.kind = LineItemKind::StockMaterial;
                match self.catalog.find_inventory(id).await? {
                    Some(stock) => {
                        if own_description.is_empty() {
                            item.description = stock.name;
                        }
                        item.unit_rate = catalog_rate(stock.selling_rate);
                        item.unit_cost = stock.cost;
                    }
                    None => warn!("Inventory entry {} not found, keeping order values", id),
                }
            }
            Some(SourceRef::Staff(id)) => {
                item.kind = LineItemKind::LaborOrService;
                match self.catalog.find_staff(id).await? {
                    Some(staff) => {
                        if own_description.is_empty() {
                            item.description = format!("Labor - {}", staff.name);
                        }
                        item.unit_rate = catalog_rate(staff.labor_rate);
                    }
                    None => warn!("Staff member {} not found, keeping order values", id),
                }
            }
            None => {}
        }

        Ok(item)
    }

    /// Validated recompute with a current payment artifact; nothing is stored
    pub async fn recompute(&self, mut inputs: BillInputs) -> Result<BillAggregate> {
        if !inputs.payee.is_complete() {
            let settings = self.payee().await;
            inputs.payee = inputs.payee.or_defaults(&settings);
        }

        let mut bill = self.builder.recompute_bill(&inputs)?;
        let artifact = self
            .artifacts
            .refresh(bill.payment_artifact.take(), &bill.link_request())
            .await;
        bill.payment_artifact = Some(artifact);

        Ok(bill)
    }

    /// Unvalidated recompute for live summaries; no encoder call
    pub fn preview(&self, inputs: &BillInputs) -> Result<BillAggregate> {
        Ok(self.builder.preview(inputs)?)
    }

    /// Recompute, validate and persist.
    ///
    /// A store failure returns `SaveFailed` carrying the computed bill so the
    /// caller can retry without recomputing.
    pub async fn save(&self, mut inputs: BillInputs) -> Result<BillAggregate> {
        if inputs.bill_id.trim().is_empty() {
            inputs.bill_id = self.allocate_bill_id().await;
        }

        let mut bill = self.recompute(inputs).await?;

        let now = Utc::now();
        bill.created_at.get_or_insert(now);
        bill.updated_at = Some(now);

        let written = match bill.internal_id {
            Some(_) => self.bills.update(&bill).await,
            None => self.bills.create(&mut bill).await.map(|_| ()),
        };

        match written {
            Ok(()) => {
                info!(
                    "Saved bill {} (total {}, balance {}, {})",
                    bill.bill_id, bill.total_amount, bill.balance, bill.status
                );
                Ok(bill)
            }
            Err(source) => {
                warn!("Saving bill {} failed: {}", bill.bill_id, source);
                Err(AppError::SaveFailed {
                    bill: Box::new(bill),
                    source,
                })
            }
        }
    }

    pub async fn get(&self, internal_id: &str) -> Result<BillAggregate> {
        self.bills
            .find_by_id(internal_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Bill {}", internal_id)))
    }

    pub async fn list(&self) -> Result<Vec<BillAggregate>> {
        Ok(self.bills.list().await?)
    }

    /// Replace the editable inputs of a stored bill
    pub async fn update(&self, internal_id: &str, mut inputs: BillInputs) -> Result<BillAggregate> {
        let existing = self.get(internal_id).await?;

        inputs.internal_id = Some(internal_id.to_string());
        inputs.created_at = existing.created_at;
        if inputs.bill_id.trim().is_empty() {
            inputs.bill_id = existing.bill_id;
        }
        if inputs.payment_artifact.is_none() {
            inputs.payment_artifact = existing.payment_artifact;
        }

        self.save(inputs).await
    }

    pub async fn record_payment(
        &self,
        internal_id: &str,
        record: PaymentRecord,
    ) -> Result<BillAggregate> {
        let bill = self.get(internal_id).await?;

        let mut ledger = PaymentLedger::from_records(bill.payment_records.clone())?;
        ledger.add_record(record)?;

        let mut inputs = bill.to_inputs();
        inputs.payment_records = ledger.into_records();

        info!("Recording payment on bill {}", bill.bill_id);
        self.save(inputs).await
    }

    pub async fn remove_payment(&self, internal_id: &str, record_id: &str) -> Result<BillAggregate> {
        let bill = self.get(internal_id).await?;

        let mut ledger = PaymentLedger::from_records(bill.payment_records.clone())?;
        ledger
            .remove_record(record_id)
            .ok_or_else(|| AppError::not_found(format!("Payment {}", record_id)))?;

        let mut inputs = bill.to_inputs();
        inputs.payment_records = ledger.into_records();

        info!("Removed payment {} from bill {}", record_id, bill.bill_id);
        self.save(inputs).await
    }

    /// Pin the requested amount, or hand it back to the balance with `Auto`
    pub async fn set_requested_amount(
        &self,
        internal_id: &str,
        requested: RequestedAmount,
    ) -> Result<BillAggregate> {
        let bill = self.get(internal_id).await?;

        let mut inputs = bill.to_inputs();
        inputs.requested_payment = requested;

        self.save(inputs).await
    }

    pub async fn pin_requested_amount(
        &self,
        internal_id: &str,
        amount: Decimal,
    ) -> Result<BillAggregate> {
        self.set_requested_amount(internal_id, RequestedAmount::pinned(amount))
            .await
    }

    pub async fn follow_balance(&self, internal_id: &str) -> Result<BillAggregate> {
        self.set_requested_amount(internal_id, RequestedAmount::Auto)
            .await
    }

    /// Discard the stored artifact and call the encoder again
    pub async fn regenerate_artifact(&self, internal_id: &str) -> Result<BillAggregate> {
        let bill = self.get(internal_id).await?;

        let mut inputs = bill.to_inputs();
        inputs.payment_artifact = None;

        info!("Regenerating payment artifact for bill {}", bill.bill_id);
        self.save(inputs).await
    }
}
