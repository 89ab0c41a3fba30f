use crate::core::{AppError, Result};
use std::env;
use std::str::FromStr;

pub mod billing;
pub mod server;

pub use billing::{BillingConfig, PayeeConfig};
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub billing: BillingConfig,
    pub payee: PayeeConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    /// Level for this crate's own spans when RUST_LOG is unset
    pub log_level: String,
    /// "json" switches the subscriber to structured output
    pub log_format: String,
}

impl AppConfig {
    /// Fallback tracing filter used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> String {
        format!(
            "tailor_billing={},actix_web=info",
            self.log_level.trim().to_lowercase()
        )
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let billing_defaults = BillingConfig::default();
        let payee_defaults = PayeeConfig::default();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_var("SERVER_PORT", 8080)?,
                workers: parse_var("SERVER_WORKERS", server::default_workers())?,
            },
            billing: BillingConfig {
                min_quantity: parse_var("BILLING_MIN_QUANTITY", billing_defaults.min_quantity)?,
                default_quantity: parse_var(
                    "BILLING_DEFAULT_QUANTITY",
                    billing_defaults.default_quantity,
                )?,
                bill_number_prefix: env::var("BILL_NUMBER_PREFIX")
                    .unwrap_or(billing_defaults.bill_number_prefix),
                bill_number_width: parse_var(
                    "BILL_NUMBER_WIDTH",
                    billing_defaults.bill_number_width,
                )?,
            },
            payee: PayeeConfig {
                payee_id: env::var("DEFAULT_PAYEE_ID").unwrap_or(payee_defaults.payee_id),
                payee_name: env::var("DEFAULT_PAYEE_NAME").unwrap_or(payee_defaults.payee_name),
                bank_details: env::var("DEFAULT_BANK_DETAILS").ok(),
                currency: env::var("PAYMENT_CURRENCY").unwrap_or(payee_defaults.currency),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.billing.min_quantity <= rust_decimal::Decimal::ZERO {
            return Err(AppError::configuration(
                "Minimum quantity must be greater than 0",
            ));
        }

        if self.billing.default_quantity < self.billing.min_quantity {
            return Err(AppError::configuration(
                "Default quantity cannot be below the minimum quantity",
            ));
        }

        if tracing::Level::from_str(self.app.log_level.trim()).is_err() {
            return Err(AppError::configuration(format!(
                "Invalid LOG_LEVEL: {}",
                self.app.log_level
            )));
        }

        if self.payee.payee_id.trim().is_empty() {
            return Err(AppError::configuration("Default payee id must not be empty"));
        }

        if self.server.workers == 0 {
            return Err(AppError::configuration(
                "Server workers must be greater than 0",
            ));
        }

        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::configuration(format!("Invalid {}", key))),
        Err(_) => Ok(default),
    }
}
