// BillRepository
//
// Typed access to the `bills` collection. Documents are written with
// null members stripped and carry their storage key as `id`.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::core::traits::PersistenceStore;
use crate::core::PersistenceError;
use crate::modules::bills::models::BillAggregate;

use super::BILLS;

pub struct BillRepository {
    store: Arc<dyn PersistenceStore>,
}

impl BillRepository {
    pub fn new(store: Arc<dyn PersistenceStore>) -> Self {
        Self { store }
    }

    fn document(bill: &BillAggregate) -> Result<Value, PersistenceError> {
        let mut document = bill
            .to_document()
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        if let (Some(id), Some(members)) = (bill.internal_id.as_ref(), document.as_object_mut()) {
            members.insert("id".to_string(), Value::String(id.clone()));
        }

        Ok(document)
    }

    /// Insert a new bill, assigning its storage key
    pub async fn create(&self, bill: &mut BillAggregate) -> Result<String, PersistenceError> {
        let internal_id = Uuid::new_v4().to_string();
        bill.internal_id = Some(internal_id);

        let document = Self::document(bill)?;
        match self.store.create(BILLS, document).await {
            Ok(id) => Ok(id),
            Err(e) => {
                bill.internal_id = None;
                Err(e)
            }
        }
    }

    /// Overwrite an existing bill.
    ///
    /// The whole document is replaced so a member cleared on the bill
    /// (a removed manual paid figure, a dropped note field) does not
    /// survive in storage.
    pub async fn update(&self, bill: &BillAggregate) -> Result<(), PersistenceError> {
        let id = bill.internal_id.as_deref().ok_or_else(|| PersistenceError::NotFound {
            collection: BILLS.to_string(),
            id: bill.bill_id.clone(),
        })?;

        self.store.replace(BILLS, id, Self::document(bill)?).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<BillAggregate>, PersistenceError> {
        self.store
            .get(BILLS, id)
            .await?
            .map(|document| {
                BillAggregate::from_document(document)
                    .map_err(|e| PersistenceError::Serialization(e.to_string()))
            })
            .transpose()
    }

    /// All bills, ordered by bill number
    pub async fn list(&self) -> Result<Vec<BillAggregate>, PersistenceError> {
        let mut bills = self
            .store
            .query(BILLS, &|_: &Value| true)
            .await?
            .into_iter()
            .map(|document| {
                BillAggregate::from_document(document)
                    .map_err(|e| PersistenceError::Serialization(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        bills.sort_by(|a, b| a.bill_id.cmp(&b.bill_id));
        Ok(bills)
    }
}
