use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::sanitize::{clamp_percent, decimal_or_zero, non_negative};

/// Fixed supplementary charges added to the subtotal next to line items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeBreakdown {
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub material_charges: Decimal,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub labor_charges: Decimal,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub accessories_charges: Decimal,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub customization_charges: Decimal,

    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub other_charges: Decimal,
}

impl ChargeBreakdown {
    /// Every charge floored at zero
    pub fn sanitized(&self) -> Self {
        Self {
            material_charges: non_negative(self.material_charges),
            labor_charges: non_negative(self.labor_charges),
            accessories_charges: non_negative(self.accessories_charges),
            customization_charges: non_negative(self.customization_charges),
            other_charges: non_negative(self.other_charges),
        }
    }

    pub fn total(&self) -> Decimal {
        let charges = self.sanitized();
        [
            charges.material_charges,
            charges.labor_charges,
            charges.accessories_charges,
            charges.customization_charges,
            charges.other_charges,
        ]
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

/// How the discount value is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Flat currency amount
    #[default]
    Amount,
    /// Percentage of the subtotal
    Percentage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub value: Decimal,

    #[serde(default)]
    pub discount_type: DiscountType,
}

impl Discount {
    pub fn amount(value: Decimal) -> Self {
        Self {
            value,
            discount_type: DiscountType::Amount,
        }
    }

    pub fn percentage(value: Decimal) -> Self {
        Self {
            value,
            discount_type: DiscountType::Percentage,
        }
    }

    /// Discount in currency for the given subtotal
    pub fn amount_for(&self, subtotal: Decimal) -> Decimal {
        match self.discount_type {
            DiscountType::Amount => non_negative(self.value),
            DiscountType::Percentage => {
                subtotal.saturating_mul(clamp_percent(self.value)) / Decimal::ONE_HUNDRED
            }
        }
    }
}
