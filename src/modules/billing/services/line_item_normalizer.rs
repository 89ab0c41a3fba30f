use rust_decimal::Decimal;
use tracing::warn;

use crate::config::BillingConfig;
use crate::core::sanitize::{non_negative, within_input_range};
use crate::core::{InvalidLineItem, LineItemIssue};
use crate::modules::billing::models::{LineItem, LineItemInput, LineItemSource, ProductInput};

/// Result of normalizing one bill's line items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedItems {
    /// Rows that take part in the totals; product groups carry their sub-items
    pub items: Vec<LineItem>,
    /// Every row the operator needs to fix, including rows kept in the totals
    pub flagged: Vec<InvalidLineItem>,
}

impl NormalizedItems {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Turns either line-item layout into canonical priced rows.
///
/// A row leaves the totals when its description is blank or its quantity
/// is not positive. A positive quantity below `min_quantity` is replaced
/// with `default_quantity` so the row does not silently price at ~zero.
pub struct LineItemNormalizer {
    min_quantity: Decimal,
    default_quantity: Decimal,
}

impl LineItemNormalizer {
    pub fn new(config: &BillingConfig) -> Self {
        Self {
            min_quantity: config.min_quantity,
            default_quantity: config.default_quantity,
        }
    }

    pub fn normalize(&self, source: &LineItemSource) -> NormalizedItems {
        let mut out = NormalizedItems::default();

        match source {
            LineItemSource::Flat(inputs) => {
                for (index, input) in inputs.iter().enumerate() {
                    let fallback_id = format!("item-{}", index + 1);
                    if let Some(item) = self.price(input, fallback_id, &mut out.flagged) {
                        out.items.push(item);
                    }
                }
            }
            LineItemSource::Grouped(products) => {
                for (index, product) in products.iter().enumerate() {
                    if let Some(group) = self.group(product, index, &mut out.flagged) {
                        out.items.push(group);
                    }
                }
            }
        }

        out
    }

    fn group(
        &self,
        product: &ProductInput,
        index: usize,
        flagged: &mut Vec<InvalidLineItem>,
    ) -> Option<LineItem> {
        let product_id = product
            .id
            .clone()
            .unwrap_or_else(|| format!("product-{}", index + 1));
        let name = product.name.trim().to_string();

        let sub_items: Vec<LineItem> = product
            .descriptions
            .iter()
            .enumerate()
            .filter_map(|(n, input)| self.price(input, format!("{}-{}", product_id, n + 1), flagged))
            .collect();

        if name.is_empty() {
            flagged.push(InvalidLineItem {
                id: product_id.clone(),
                description: name.clone(),
                reasons: vec![LineItemIssue::EmptyDescription],
            });
        }

        if sub_items.is_empty() {
            return None;
        }

        Some(LineItem::group(product_id, name, sub_items))
    }

    /// Price one row. Returns None when the row must stay out of the totals.
    fn price(
        &self,
        input: &LineItemInput,
        fallback_id: String,
        flagged: &mut Vec<InvalidLineItem>,
    ) -> Option<LineItem> {
        let id = input
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or(fallback_id);
        let description = input.description.trim().to_string();

        let mut reasons = Vec::new();
        if description.is_empty() {
            reasons.push(LineItemIssue::EmptyDescription);
        }
        if input.quantity <= Decimal::ZERO {
            reasons.push(LineItemIssue::NonPositiveQuantity);
        }
        if input.unit_rate <= Decimal::ZERO {
            reasons.push(LineItemIssue::NonPositiveRate);
        }
        if !within_input_range(input.quantity) || !within_input_range(input.unit_rate) {
            reasons.push(LineItemIssue::OutOfRange);
        }

        let excluded = reasons.iter().any(|r| {
            matches!(
                r,
                LineItemIssue::EmptyDescription
                    | LineItemIssue::NonPositiveQuantity
                    | LineItemIssue::OutOfRange
            )
        });

        if !reasons.is_empty() {
            flagged.push(InvalidLineItem {
                id: id.clone(),
                description: description.clone(),
                reasons,
            });
        }

        if excluded {
            return None;
        }

        let quantity = if input.quantity < self.min_quantity {
            warn!(
                "Line item {} quantity {} below minimum {}, using {}",
                id, input.quantity, self.min_quantity, self.default_quantity
            );
            self.default_quantity
        } else {
            input.quantity
        };

        Some(LineItem::priced(
            id,
            input.kind,
            input.source_ref.clone(),
            description,
            quantity,
            non_negative(input.unit_rate),
            non_negative(input.unit_cost),
        ))
    }
}
