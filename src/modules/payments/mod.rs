// Payments module: payment records, ledger aggregation, status and balance

pub mod models;
pub mod services;

pub use models::{BillStatus, PaymentMethod, PaymentRecord};
pub use services::{derive_balance, derive_status, LedgerTotals, PaymentLedger};
