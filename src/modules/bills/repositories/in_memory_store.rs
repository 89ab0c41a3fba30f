// In-process document store
//
// Backs the binary and the test suites. Collections are created lazily;
// `update` performs a shallow merge of top-level members and `replace`
// overwrites the whole document, matching the document-database semantics
// the billing core is written against.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::traits::{PersistenceStore, Predicate};
use crate::core::PersistenceError;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document under a known key
    pub async fn put(&self, collection: &str, id: &str, record: Value) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), record);
    }

    fn ensure_object(value: &Value) -> Result<(), PersistenceError> {
        if value.is_object() {
            Ok(())
        } else {
            Err(PersistenceError::Serialization(
                "documents must be JSON objects".to_string(),
            ))
        }
    }

    fn contains_null(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Object(map) => map.values().any(Self::contains_null),
            Value::Array(items) => items.iter().any(Self::contains_null),
            _ => false,
        }
    }

    fn reject_nulls(value: &Value) -> Result<(), PersistenceError> {
        if Self::contains_null(value) {
            Err(PersistenceError::Serialization(
                "documents must not contain null values".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PersistenceStore for InMemoryStore {
    async fn create(&self, collection: &str, record: Value) -> Result<String, PersistenceError> {
        Self::ensure_object(&record)?;
        Self::reject_nulls(&record)?;

        let id = record
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        if documents.contains_key(&id) {
            return Err(PersistenceError::Conflict(format!(
                "{}/{} already exists",
                collection, id
            )));
        }

        documents.insert(id.clone(), record);
        Ok(id)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        partial: Value,
    ) -> Result<(), PersistenceError> {
        Self::reject_nulls(&partial)?;
        let Value::Object(members) = partial else {
            return Err(PersistenceError::Serialization(
                "partial update must be a JSON object".to_string(),
            ));
        };

        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(id))
            .and_then(Value::as_object_mut)
            .ok_or_else(|| PersistenceError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        for (key, value) in members {
            document.insert(key, value);
        }

        Ok(())
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        record: Value,
    ) -> Result<(), PersistenceError> {
        Self::ensure_object(&record)?;
        Self::reject_nulls(&record)?;

        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(id))
            .ok_or_else(|| PersistenceError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        *document = record;
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, PersistenceError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn query(
        &self,
        collection: &str,
        predicate: Predicate<'_>,
    ) -> Result<Vec<Value>, PersistenceError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .values()
                    .filter(|doc| predicate(*doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
