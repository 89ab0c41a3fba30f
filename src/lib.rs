//! Tailor Shop Billing Library
//!
//! Bill computation, payment tracking and payment-link generation for a
//! tailoring shop, with an actix-web HTTP surface over a document store.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

use actix_web::web;

// Re-export commonly used types
pub use modules::artifacts;
pub use modules::billing;
pub use modules::bills;
pub use modules::payments;

/// Register every HTTP route of the service
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(modules::health::controllers::configure)
        .configure(modules::bills::controllers::configure);
}
