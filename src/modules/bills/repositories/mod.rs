pub mod bill_repository;
pub mod catalog_repository;
pub mod in_memory_store;
pub mod sequence_allocator;
pub mod settings_provider;

pub use bill_repository::BillRepository;
pub use catalog_repository::CatalogRepository;
pub use in_memory_store::InMemoryStore;
pub use sequence_allocator::{fallback_bill_identifier, StoreSequenceAllocator};
pub use settings_provider::StoreSettingsProvider;

/// Collection names in the document store
pub const BILLS: &str = "bills";
pub const ORDERS: &str = "orders";
pub const INVENTORY: &str = "inventory";
pub const STAFF: &str = "staff";
pub const SETTINGS: &str = "settings";
pub const COUNTERS: &str = "counters";
