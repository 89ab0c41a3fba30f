use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayeeConfig;
use crate::core::sanitize::{decimal_or_zero, non_negative};

/// Who receives the money
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeeDetails {
    #[serde(default)]
    pub payee_id: String,

    #[serde(default)]
    pub payee_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<String>,
}

impl PayeeDetails {
    /// Both the payee id and the display name are present
    pub fn is_complete(&self) -> bool {
        !self.payee_id.trim().is_empty() && !self.payee_name.trim().is_empty()
    }

    /// Fill every blank field from `defaults`, field by field
    pub fn or_defaults(self, defaults: &PayeeDetails) -> Self {
        fn pick(value: String, default: &str) -> String {
            if value.trim().is_empty() {
                default.to_string()
            } else {
                value
            }
        }

        Self {
            payee_id: pick(self.payee_id, &defaults.payee_id),
            payee_name: pick(self.payee_name, &defaults.payee_name),
            bank_details: self
                .bank_details
                .filter(|details| !details.trim().is_empty())
                .or_else(|| defaults.bank_details.clone()),
        }
    }
}

impl From<&PayeeConfig> for PayeeDetails {
    fn from(config: &PayeeConfig) -> Self {
        Self {
            payee_id: config.payee_id.clone(),
            payee_name: config.payee_name.clone(),
            bank_details: config.bank_details.clone(),
        }
    }
}

/// Optional context appended to the payment note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentNote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
}

/// Whether the requested amount follows the balance or was set by the operator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RequestedAmount {
    /// Track the outstanding balance on every recompute
    #[default]
    Auto,
    /// Fixed by explicit operator action
    Pinned {
        #[serde(default, deserialize_with = "decimal_or_zero")]
        amount: Decimal,
    },
}

impl RequestedAmount {
    pub fn pinned(amount: Decimal) -> Self {
        RequestedAmount::Pinned { amount }
    }

    /// Amount to encode into the payment link
    pub fn resolve(&self, balance: Decimal) -> Decimal {
        match self {
            RequestedAmount::Auto => balance,
            RequestedAmount::Pinned { amount } => non_negative(*amount),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, RequestedAmount::Auto)
    }
}

/// The inputs whose change forces a new artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactKey {
    pub payee_id: String,
    pub payee_name: String,
    pub amount: Decimal,
    pub bill_id: String,
}

/// Everything needed to build a payment link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLinkRequest {
    pub payee: PayeeDetails,
    pub amount: Decimal,
    pub bill_id: String,
    pub note: PaymentNote,
}

impl PaymentLinkRequest {
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey {
            payee_id: self.payee.payee_id.clone(),
            payee_name: self.payee.payee_name.clone(),
            amount: self.amount,
            bill_id: self.bill_id.clone(),
        }
    }
}

/// Payment deep link plus its scannable rendering.
///
/// `scannable_code_image` is None when encoding failed; the artifact is
/// then retried on the next refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentArtifact {
    pub deep_link: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scannable_code_image: Option<String>,

    pub key: ArtifactKey,
}

impl PaymentArtifact {
    /// Still valid for `key` and fully rendered
    pub fn is_current(&self, key: &ArtifactKey) -> bool {
        &self.key == key && self.scannable_code_image.is_some()
    }
}
