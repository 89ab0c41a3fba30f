mod charges;
mod line_item;

pub use charges::{ChargeBreakdown, Discount, DiscountType};
pub use line_item::{
    source_from_items, LineItem, LineItemInput, LineItemKind, LineItemSource, ProductInput,
    SourceRef,
};
