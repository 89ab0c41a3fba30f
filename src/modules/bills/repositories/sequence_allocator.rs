use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::core::traits::{PersistenceStore, SequenceAllocator};
use crate::core::AppError;

use super::COUNTERS;

const BILL_COUNTER_ID: &str = "bills";

/// Monotonic bill numbers from the `counters/bills` document.
///
/// Read-then-write without a transaction: concurrent sessions can race.
/// Acceptable for a single-counter shop; a shared deployment needs an
/// atomic increment in the store.
pub struct StoreSequenceAllocator {
    store: Arc<dyn PersistenceStore>,
    prefix: String,
    width: usize,
}

impl StoreSequenceAllocator {
    pub fn new(store: Arc<dyn PersistenceStore>, prefix: impl Into<String>, width: usize) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            width,
        }
    }

    pub fn format(&self, sequence: u64) -> String {
        format!("{}{:0width$}", self.prefix, sequence, width = self.width)
    }
}

#[async_trait]
impl SequenceAllocator for StoreSequenceAllocator {
    async fn next_bill_identifier(&self) -> Result<String, AppError> {
        let current = self.store.get(COUNTERS, BILL_COUNTER_ID).await?;

        let next = match current {
            Some(document) => {
                let value = document
                    .get("value")
                    .and_then(|v| v.as_u64())
                    .ok_or_else(|| AppError::internal("bill counter is not a number"))?;
                let next = value + 1;
                self.store
                    .update(COUNTERS, BILL_COUNTER_ID, json!({ "value": next }))
                    .await?;
                next
            }
            None => {
                self.store
                    .create(COUNTERS, json!({ "id": BILL_COUNTER_ID, "value": 1 }))
                    .await?;
                1
            }
        };

        Ok(self.format(next))
    }
}

/// Timestamp-derived bill number used when the allocator fails
pub fn fallback_bill_identifier(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}{}", prefix, now.format("%Y%m%d%H%M%S"))
}
