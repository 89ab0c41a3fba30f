pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{BillAggregate, BillInputs};
pub use services::{BillAggregateBuilder, BillService};
