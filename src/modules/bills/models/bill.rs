// Bill inputs and the persistable bill aggregate
//
// `BillInputs` is everything the operator can edit. `BillAggregate` is the
// result of running those inputs through the recompute pipeline: every
// money figure in it is derived, and the only way to change one is to
// edit the inputs (see `to_inputs`) and recompute.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::sanitize::{decimal_or_zero, optional_decimal, strip_nulls};
use crate::modules::artifacts::models::{
    ArtifactKey, PayeeDetails, PaymentArtifact, PaymentLinkRequest, PaymentNote, RequestedAmount,
};
use crate::modules::billing::models::{
    source_from_items, ChargeBreakdown, Discount, LineItem, LineItemInput, LineItemSource,
    ProductInput,
};
use crate::modules::payments::models::{BillStatus, PaymentRecord};

/// Editable state of a bill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BillInputsRecord")]
pub struct BillInputs {
    /// Human-facing bill number
    #[serde(default)]
    pub bill_id: String,

    /// Storage key, absent until first save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<String>,

    #[serde(default)]
    pub customer_name: String,

    #[serde(default)]
    pub customer_contact: String,

    #[serde(default)]
    pub items: LineItemSource,

    #[serde(default)]
    pub breakdown: ChargeBreakdown,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub tax_rate_percent: Decimal,

    #[serde(default)]
    pub discount: Discount,

    #[serde(default)]
    pub payment_records: Vec<PaymentRecord>,

    /// Paid-to-date typed by hand; only honoured while there are no records
    #[serde(
        default,
        deserialize_with = "optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_paid_amount: Option<Decimal>,

    #[serde(default)]
    pub requested_payment: RequestedAmount,

    #[serde(default)]
    pub payee: PayeeDetails,

    #[serde(default)]
    pub note: PaymentNote,

    /// Artifact from the previous recompute, reused when still current
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_artifact: Option<PaymentArtifact>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Incoming shape of `BillInputs`.
///
/// Records written before products were grouped carry `legacy_items` and
/// `products` side by side instead of a tagged `items` layout. They are
/// resolved into one layout here, once.
#[derive(Deserialize)]
struct BillInputsRecord {
    #[serde(default)]
    bill_id: String,
    #[serde(default)]
    internal_id: Option<String>,
    #[serde(default)]
    customer_name: String,
    #[serde(default)]
    customer_contact: String,
    #[serde(default)]
    items: Option<LineItemSource>,
    #[serde(default)]
    legacy_items: Vec<LineItemInput>,
    #[serde(default)]
    products: Vec<ProductInput>,
    #[serde(default)]
    breakdown: ChargeBreakdown,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    tax_rate_percent: Decimal,
    #[serde(default)]
    discount: Discount,
    #[serde(default)]
    payment_records: Vec<PaymentRecord>,
    #[serde(default, deserialize_with = "optional_decimal")]
    manual_paid_amount: Option<Decimal>,
    #[serde(default)]
    requested_payment: RequestedAmount,
    #[serde(default)]
    payee: PayeeDetails,
    #[serde(default)]
    note: PaymentNote,
    #[serde(default)]
    payment_artifact: Option<PaymentArtifact>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<BillInputsRecord> for BillInputs {
    fn from(record: BillInputsRecord) -> Self {
        let items = match record.items {
            Some(items) => items,
            None => LineItemSource::resolve(record.legacy_items, record.products),
        };

        Self {
            bill_id: record.bill_id,
            internal_id: record.internal_id,
            customer_name: record.customer_name,
            customer_contact: record.customer_contact,
            items,
            breakdown: record.breakdown,
            tax_rate_percent: record.tax_rate_percent,
            discount: record.discount,
            payment_records: record.payment_records,
            manual_paid_amount: record.manual_paid_amount,
            requested_payment: record.requested_payment,
            payee: record.payee,
            note: record.note,
            payment_artifact: record.payment_artifact,
            created_at: record.created_at,
        }
    }
}

impl BillInputs {
    pub fn new(bill_id: impl Into<String>, payee: PayeeDetails) -> Self {
        Self {
            bill_id: bill_id.into(),
            payee,
            ..Self::default()
        }
    }
}

/// Fully derived, internally consistent bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillAggregate {
    pub bill_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<String>,

    pub customer_name: String,
    pub customer_contact: String,

    pub line_items: Vec<LineItem>,
    pub breakdown: ChargeBreakdown,
    pub tax_rate_percent: Decimal,
    pub discount: Discount,

    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub cash_received: Decimal,
    pub online_received: Decimal,
    pub balance: Decimal,
    pub status: BillStatus,

    pub payment_records: Vec<PaymentRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_paid_amount: Option<Decimal>,

    pub requested_payment: RequestedAmount,
    pub requested_payment_amount: Decimal,

    pub payee: PayeeDetails,

    #[serde(default)]
    pub note: PaymentNote,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_artifact: Option<PaymentArtifact>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BillAggregate {
    pub fn link_request(&self) -> PaymentLinkRequest {
        PaymentLinkRequest {
            payee: self.payee.clone(),
            amount: self.requested_payment_amount,
            bill_id: self.bill_id.clone(),
            note: self.note.clone(),
        }
    }

    pub fn artifact_key(&self) -> ArtifactKey {
        self.link_request().key()
    }

    /// Editable inputs that recompute to this bill
    pub fn to_inputs(&self) -> BillInputs {
        BillInputs {
            bill_id: self.bill_id.clone(),
            internal_id: self.internal_id.clone(),
            customer_name: self.customer_name.clone(),
            customer_contact: self.customer_contact.clone(),
            items: source_from_items(&self.line_items),
            breakdown: self.breakdown,
            tax_rate_percent: self.tax_rate_percent,
            discount: self.discount,
            payment_records: self.payment_records.clone(),
            manual_paid_amount: self.manual_paid_amount,
            requested_payment: self.requested_payment,
            payee: self.payee.clone(),
            note: self.note.clone(),
            payment_artifact: self.payment_artifact.clone(),
            created_at: self.created_at,
        }
    }

    /// Persistable document with every null member removed
    pub fn to_document(&self) -> Result<serde_json::Value, serde_json::Error> {
        Ok(strip_nulls(serde_json::to_value(self)?))
    }

    pub fn from_document(document: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(document)
    }
}
