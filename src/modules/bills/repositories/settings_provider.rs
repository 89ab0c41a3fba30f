use std::sync::Arc;

use async_trait::async_trait;

use crate::core::traits::{PersistenceStore, SettingsProvider};
use crate::core::AppError;
use crate::modules::artifacts::models::PayeeDetails;

use super::SETTINGS;

const PAYMENT_SETTINGS_ID: &str = "payment";

/// Reads the payee identity from the `settings/payment` document.
///
/// Members missing from the document come back blank; the caller fills
/// them from its configured defaults.
pub struct StoreSettingsProvider {
    store: Arc<dyn PersistenceStore>,
}

impl StoreSettingsProvider {
    pub fn new(store: Arc<dyn PersistenceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SettingsProvider for StoreSettingsProvider {
    async fn payment_payee_details(&self) -> Result<PayeeDetails, AppError> {
        let document = self
            .store
            .get(SETTINGS, PAYMENT_SETTINGS_ID)
            .await?
            .ok_or_else(|| AppError::not_found("payment settings"))?;

        Ok(serde_json::from_value(document)?)
    }
}
