pub mod payment_ledger;
pub mod settlement;

pub use payment_ledger::{LedgerTotals, PaymentLedger};
pub use settlement::{derive_balance, derive_status};
