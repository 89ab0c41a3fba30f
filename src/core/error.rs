use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::modules::bills::models::BillAggregate;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Why a single line item cannot be billed as entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemIssue {
    EmptyDescription,
    NonPositiveQuantity,
    NonPositiveRate,
    /// Quantity or rate beyond the accepted input range
    OutOfRange,
}

/// A line item flagged during normalization, with every reason it failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidLineItem {
    pub id: String,
    pub description: String,
    pub reasons: Vec<LineItemIssue>,
}

/// Business-rule violations surfaced to the operator.
///
/// Every variant carries enough detail for a caller to highlight the
/// offending field or rows; none of them are swallowed inside the core.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Bill has no billable line items")]
    NoBillableContent,

    #[error("{} line item(s) are invalid", .items.len())]
    InvalidLineItem { items: Vec<InvalidLineItem> },

    #[error(
        "Split payment {record_id}: cash {cash_portion} + online {online_portion} does not equal amount {amount}"
    )]
    InconsistentSplitPayment {
        record_id: String,
        amount: Decimal,
        cash_portion: Decimal,
        online_portion: Decimal,
    },

    #[error("Payment {record_id} amount must be positive, got {amount}")]
    NonPositivePayment { record_id: String, amount: Decimal },

    #[error("Payment {record_id} is already recorded")]
    DuplicatePayment { record_id: String },
}

impl ValidationError {
    /// Machine-readable detail for API consumers
    pub fn details(&self) -> serde_json::Value {
        match self {
            ValidationError::MissingField { field } => {
                json!({ "kind": "missing_field", "field": field })
            }
            ValidationError::NoBillableContent => json!({ "kind": "no_billable_content" }),
            ValidationError::InvalidLineItem { items } => {
                json!({ "kind": "invalid_line_item", "items": items })
            }
            ValidationError::InconsistentSplitPayment { record_id, .. } => {
                json!({ "kind": "inconsistent_split_payment", "record_id": record_id })
            }
            ValidationError::NonPositivePayment { record_id, .. } => {
                json!({ "kind": "non_positive_payment", "record_id": record_id })
            }
            ValidationError::DuplicatePayment { record_id } => {
                json!({ "kind": "duplicate_payment", "record_id": record_id })
            }
        }
    }
}

/// Scannable-code rendering failures. Recovered locally by the artifact generator.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("QR code generation failed: {0}")]
    Qr(String),

    #[error("Image encoding failed: {0}")]
    Image(String),
}

/// Failures reported by the persistence collaborator
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    #[error("Write conflict: {0}")]
    Conflict(String),

    #[error("Document serialization failed: {0}")]
    Serialization(String),
}

impl PersistenceError {
    /// Whether the same write may succeed if attempted again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PersistenceError::Unavailable(_) | PersistenceError::Conflict(_)
        )
    }
}

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Scannable code could not be produced
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Store operation errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// The bill was computed but the store write failed; the bill is handed back
    #[error("Failed to save bill {}: {source}", .bill.bill_id)]
    SaveFailed {
        bill: Box<BillAggregate>,
        #[source]
        source: PersistenceError,
    },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let details = match self {
            AppError::Validation(err) => err.details(),
            AppError::Persistence(err) => json!({ "retryable": err.is_retryable() }),
            AppError::SaveFailed { bill, source } => json!({
                "retryable": source.is_retryable(),
                "bill": bill,
            }),
            _ => serde_json::Value::Null,
        };

        HttpResponse::build(status_code).json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
                "details": details,
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Persistence(PersistenceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Persistence(err) if err.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SaveFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }
}
