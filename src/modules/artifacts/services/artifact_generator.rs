use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::traits::ScannableCodeEncoder;
use crate::modules::artifacts::models::{PaymentArtifact, PaymentLinkRequest, PaymentNote};

/// Builds UPI payment deep links and their scannable renderings
pub struct PaymentArtifactGenerator {
    encoder: Arc<dyn ScannableCodeEncoder>,
    currency: String,
}

impl PaymentArtifactGenerator {
    pub fn new(encoder: Arc<dyn ScannableCodeEncoder>, currency: impl Into<String>) -> Self {
        Self {
            encoder,
            currency: currency.into(),
        }
    }

    /// Human-readable note: bill reference followed by whichever order
    /// details are present, in a fixed order
    pub fn build_note(bill_id: &str, note: &PaymentNote) -> String {
        let mut text = format!("Payment for bill {}", bill_id);

        let parts = [
            ("Order", &note.order_name),
            ("For", &note.recipient),
            ("Order ID", &note.order_id),
            ("Delivery", &note.delivery_date),
        ];

        for (label, value) in parts {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                text.push_str(&format!(" | {}: {}", label, value));
            }
        }

        text
    }

    /// Deterministic UPI intent link:
    /// upi://pay?pa=...&pn=...&am=...&cu=...&tn=...&tr=...
    pub fn build_link(&self, request: &PaymentLinkRequest) -> String {
        let amount = request.amount.round_dp(2);
        let note = Self::build_note(&request.bill_id, &request.note);

        format!(
            "upi://pay?pa={}&pn={}&am={:.2}&cu={}&tn={}&tr={}",
            urlencoding::encode(request.payee.payee_id.trim()),
            urlencoding::encode(request.payee.payee_name.trim()),
            amount,
            self.currency,
            urlencoding::encode(&note),
            urlencoding::encode(&request.bill_id),
        )
    }

    /// Reuse `previous` when nothing that matters changed, otherwise generate.
    ///
    /// Note text is not part of the key: editing it alone does not trigger
    /// a new encoder call.
    pub async fn refresh(
        &self,
        previous: Option<PaymentArtifact>,
        request: &PaymentLinkRequest,
    ) -> PaymentArtifact {
        let key = request.key();

        match previous {
            Some(artifact) if artifact.is_current(&key) => {
                debug!("Payment artifact for bill {} is current", request.bill_id);
                artifact
            }
            _ => self.generate(request).await,
        }
    }

    /// Always build a new link and call the encoder.
    ///
    /// An encoder failure yields an artifact without image; the bill can
    /// still be saved and the image regenerated later.
    pub async fn generate(&self, request: &PaymentLinkRequest) -> PaymentArtifact {
        let deep_link = self.build_link(request);

        let scannable_code_image = match self.encoder.encode(&deep_link).await {
            Ok(image) => {
                info!(
                    "Generated payment artifact for bill {} ({})",
                    request.bill_id, request.amount
                );
                Some(image)
            }
            Err(e) => {
                warn!(
                    "Scannable code for bill {} unavailable: {}",
                    request.bill_id, e
                );
                None
            }
        };

        PaymentArtifact {
            deep_link,
            scannable_code_image,
            key: request.key(),
        }
    }
}
