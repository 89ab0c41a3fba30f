use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::PersistenceError;

/// Filter applied to every document of a collection during `query`
pub type Predicate<'a> = &'a (dyn Fn(&Value) -> bool + Send + Sync);

/// Document store consumed by the billing core.
///
/// Documents are schemaless JSON objects. Callers strip null members
/// before every write.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Insert a document and return its key.
    ///
    /// A string `"id"` member on the record is used as the key when present.
    async fn create(&self, collection: &str, record: Value) -> Result<String, PersistenceError>;

    /// Merge the top-level members of `partial` into an existing document
    async fn update(&self, collection: &str, id: &str, partial: Value)
        -> Result<(), PersistenceError>;

    /// Overwrite an existing document; members absent from `record` are dropped
    async fn replace(&self, collection: &str, id: &str, record: Value)
        -> Result<(), PersistenceError>;

    /// Fetch a document by key
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, PersistenceError>;

    /// Return every document in `collection` matching `predicate`
    async fn query(
        &self,
        collection: &str,
        predicate: Predicate<'_>,
    ) -> Result<Vec<Value>, PersistenceError>;
}
