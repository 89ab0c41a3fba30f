mod bill;
mod order;

pub use bill::{BillAggregate, BillInputs};
pub use order::{ExternalOrder, InventoryEntry, OrderEntry, StaffMember};
