// Billing module: line items, supplementary charges and totals

pub mod models;
pub mod services;

pub use models::{ChargeBreakdown, Discount, DiscountType, LineItem, LineItemSource};
pub use services::{BillTotals, LineItemNormalizer, TotalsCalculator};
