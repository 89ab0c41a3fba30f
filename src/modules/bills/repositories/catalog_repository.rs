use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::core::traits::PersistenceStore;
use crate::core::PersistenceError;
use crate::modules::bills::models::{ExternalOrder, InventoryEntry, StaffMember};

use super::{INVENTORY, ORDERS, STAFF};

/// Read-only access to orders and the inventory / staff catalogs
pub struct CatalogRepository {
    store: Arc<dyn PersistenceStore>,
}

impl CatalogRepository {
    pub fn new(store: Arc<dyn PersistenceStore>) -> Self {
        Self { store }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, PersistenceError> {
        self.store
            .get(collection, id)
            .await?
            .map(|document| {
                serde_json::from_value(document)
                    .map_err(|e| PersistenceError::Serialization(e.to_string()))
            })
            .transpose()
    }

    pub async fn find_order(&self, id: &str) -> Result<Option<ExternalOrder>, PersistenceError> {
        let order: Option<ExternalOrder> = self.fetch(ORDERS, id).await?;
        Ok(order.map(|mut order| {
            if order.id.is_empty() {
                order.id = id.to_string();
            }
            order
        }))
    }

    pub async fn find_inventory(&self, id: &str) -> Result<Option<InventoryEntry>, PersistenceError> {
        self.fetch(INVENTORY, id).await
    }

    pub async fn find_staff(&self, id: &str) -> Result<Option<StaffMember>, PersistenceError> {
        self.fetch(STAFF, id).await
    }
}
