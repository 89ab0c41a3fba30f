pub mod line_item_normalizer;
pub mod totals_calculator;

pub use line_item_normalizer::{LineItemNormalizer, NormalizedItems};
pub use totals_calculator::{BillTotals, TotalsCalculator};
