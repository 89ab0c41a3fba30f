use async_trait::async_trait;

use crate::core::error::{AppError, EncodingError};
use crate::modules::artifacts::models::PayeeDetails;

/// Source of the payee identity printed into payment links
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    async fn payment_payee_details(&self) -> Result<PayeeDetails, AppError>;
}

/// Allocates human-facing bill numbers
#[async_trait]
pub trait SequenceAllocator: Send + Sync {
    async fn next_bill_identifier(&self) -> Result<String, AppError>;
}

/// Renders text (a payment deep link) as a scannable image.
///
/// The returned string is a self-contained image reference, e.g. a
/// `data:image/png;base64,...` URL.
#[async_trait]
pub trait ScannableCodeEncoder: Send + Sync {
    async fn encode(&self, text: &str) -> Result<String, EncodingError>;
}
