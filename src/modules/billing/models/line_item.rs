// Line item models
//
// `LineItemInput` is what the operator types: untrusted, possibly blank
// or garbled. `LineItem` is the canonical, priced row produced by the
// normalizer; its `amount` is always quantity × unit_rate and is never
// read back from input. Arithmetic saturates instead of panicking on
// overflow.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::sanitize::decimal_or_zero;

/// What a billable row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    StockMaterial,
    LaborOrService,
    #[default]
    CustomWork,
}

/// Pointer into an external catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "catalog", content = "id", rename_all = "snake_case")]
pub enum SourceRef {
    Inventory(String),
    Staff(String),
}

/// A line item as entered, before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub kind: LineItemKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<SourceRef>,

    #[serde(default)]
    pub description: String,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub quantity: Decimal,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub unit_rate: Decimal,

    /// Informational only; never enters the totals
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub unit_cost: Decimal,
}

impl LineItemInput {
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_rate: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_rate,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Amount this row would contribute, without any normalization rules applied
    pub fn raw_amount(&self) -> Decimal {
        self.quantity.saturating_mul(self.unit_rate)
    }
}

/// A product grouping several description rows (e.g. "Sherwani" with
/// stitching, lining and embroidery rows)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub descriptions: Vec<LineItemInput>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, descriptions: Vec<LineItemInput>) -> Self {
        Self {
            id: None,
            name: name.into(),
            descriptions,
        }
    }
}

/// The two line-item layouts a bill may arrive in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", content = "entries", rename_all = "snake_case")]
pub enum LineItemSource {
    /// Legacy one-row-per-item list
    Flat(Vec<LineItemInput>),
    /// Products owning description sub-items
    Grouped(Vec<ProductInput>),
}

impl Default for LineItemSource {
    fn default() -> Self {
        LineItemSource::Flat(Vec::new())
    }
}

impl LineItemSource {
    /// Pick the authoritative layout for a record carrying both.
    ///
    /// Grouped products win as soon as any description row carries a
    /// non-zero amount; otherwise the legacy flat list is used.
    pub fn resolve(legacy: Vec<LineItemInput>, products: Vec<ProductInput>) -> Self {
        let grouped_has_content = products
            .iter()
            .flat_map(|p| p.descriptions.iter())
            .any(|d| !d.raw_amount().is_zero());

        if grouped_has_content {
            LineItemSource::Grouped(products)
        } else {
            LineItemSource::Flat(legacy)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            LineItemSource::Flat(items) => items.is_empty(),
            LineItemSource::Grouped(products) => products.is_empty(),
        }
    }
}

/// Canonical priced line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub kind: LineItemKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<SourceRef>,

    pub description: String,
    pub quantity: Decimal,
    pub unit_rate: Decimal,
    pub unit_cost: Decimal,

    /// quantity × unit_rate, or the sum of `sub_items` for a product group
    pub amount: Decimal,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_items: Vec<LineItem>,
}

impl LineItem {
    /// Build a priced leaf item
    pub fn priced(
        id: String,
        kind: LineItemKind,
        source_ref: Option<SourceRef>,
        description: String,
        quantity: Decimal,
        unit_rate: Decimal,
        unit_cost: Decimal,
    ) -> Self {
        Self {
            id,
            kind,
            source_ref,
            description,
            quantity,
            unit_rate,
            unit_cost,
            amount: quantity.saturating_mul(unit_rate),
            sub_items: Vec::new(),
        }
    }

    /// Build a product row whose amount is the roll-up of its sub-items
    pub fn group(id: String, name: String, sub_items: Vec<LineItem>) -> Self {
        let amount = sub_items
            .iter()
            .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.amount));
        let unit_cost = sub_items.iter().fold(Decimal::ZERO, |sum, item| {
            sum.saturating_add(item.unit_cost.saturating_mul(item.quantity))
        });

        Self {
            id,
            kind: LineItemKind::CustomWork,
            source_ref: None,
            description: name,
            quantity: Decimal::ONE,
            unit_rate: amount,
            unit_cost,
            amount,
            sub_items,
        }
    }

    pub fn is_group(&self) -> bool {
        !self.sub_items.is_empty()
    }

    /// Turn a canonical row back into editable input
    pub fn to_input(&self) -> LineItemInput {
        LineItemInput {
            id: Some(self.id.clone()),
            kind: self.kind,
            source_ref: self.source_ref.clone(),
            description: self.description.clone(),
            quantity: self.quantity,
            unit_rate: self.unit_rate,
            unit_cost: self.unit_cost,
        }
    }
}

/// Rebuild the input layout from canonical items
pub fn source_from_items(items: &[LineItem]) -> LineItemSource {
    if items.iter().any(LineItem::is_group) {
        LineItemSource::Grouped(
            items
                .iter()
                .map(|item| ProductInput {
                    id: Some(item.id.clone()),
                    name: item.description.clone(),
                    descriptions: item.sub_items.iter().map(LineItem::to_input).collect(),
                })
                .collect(),
        )
    } else {
        LineItemSource::Flat(items.iter().map(LineItem::to_input).collect())
    }
}
