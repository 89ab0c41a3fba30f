use rust_decimal::Decimal;

/// Knobs for line-item normalization and bill numbering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingConfig {
    /// Quantities below this (but above zero) are replaced by `default_quantity`
    pub min_quantity: Decimal,
    pub default_quantity: Decimal,
    pub bill_number_prefix: String,
    /// Zero-padding width of the sequence part of a bill number
    pub bill_number_width: usize,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            min_quantity: Decimal::new(1, 1),
            default_quantity: Decimal::ONE,
            bill_number_prefix: "BILL-".to_string(),
            bill_number_width: 4,
        }
    }
}

/// Payee identity used when the settings collaborator cannot supply one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayeeConfig {
    pub payee_id: String,
    pub payee_name: String,
    pub bank_details: Option<String>,
    /// ISO currency code written into payment links
    pub currency: String,
}

impl Default for PayeeConfig {
    fn default() -> Self {
        Self {
            payee_id: "tailorshop@upi".to_string(),
            payee_name: "Tailor Shop".to_string(),
            bank_details: None,
            currency: "INR".to_string(),
        }
    }
}
