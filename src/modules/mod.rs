pub mod artifacts;
pub mod billing;
pub mod bills;
pub mod health;
pub mod payments;
