pub mod bill_builder;
pub mod bill_service;

pub use bill_builder::BillAggregateBuilder;
pub use bill_service::BillService;
