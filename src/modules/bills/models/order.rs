// External order and catalog records read when drafting a bill from an order

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::sanitize::decimal_or_zero;
use crate::modules::billing::models::SourceRef;

/// A customer order as kept by the order-taking side of the shop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalOrder {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub order_name: Option<String>,

    #[serde(default)]
    pub customer_name: String,

    #[serde(default)]
    pub customer_contact: String,

    /// Person the garment is for, when not the customer
    #[serde(default)]
    pub recipient: Option<String>,

    #[serde(default)]
    pub delivery_date: Option<String>,

    #[serde(default)]
    pub entries: Vec<OrderEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderEntry {
    #[serde(default)]
    pub source_ref: Option<SourceRef>,

    #[serde(default)]
    pub description: String,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub quantity: Decimal,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub unit_rate: Decimal,
}

/// Stock material in the inventory catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub selling_rate: Decimal,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub cost: Decimal,
}

/// Staff member whose labor is billed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub labor_rate: Decimal,
}
