use std::collections::HashMap;
use std::sync::RwLock;

use super::domain::{ReceiptId, StoredReceipt};

/// Storage abstraction so the admission service can be exercised in isolation.
///
/// Implementations must make `insert_if_absent` an atomic check-and-set: when
/// several callers race on one identifier, exactly one insert succeeds.
pub trait ReceiptStore: Send + Sync {
    fn insert_if_absent(&self, record: StoredReceipt) -> Result<(), StoreError>;
    fn points(&self, id: &ReceiptId) -> Result<u64, StoreError>;
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// Error enumeration for store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("receipt {0} already exists")]
    AlreadyExists(ReceiptId),
    #[error("receipt {0} not found")]
    NotFound(ReceiptId),
    #[error("receipt store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store guarded by a readers-writer lock.
#[derive(Debug, Default)]
pub struct InMemoryReceiptStore {
    records: RwLock<HashMap<ReceiptId, StoredReceipt>>,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("receipt store lock poisoned".to_string())
}

impl ReceiptStore for InMemoryReceiptStore {
    fn insert_if_absent(&self, record: StoredReceipt) -> Result<(), StoreError> {
        // The write guard spans both the lookup and the insert.
        let mut guard = self.records.write().map_err(poisoned)?;
        if guard.contains_key(&record.id) {
            return Err(StoreError::AlreadyExists(record.id));
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn points(&self, id: &ReceiptId) -> Result<u64, StoreError> {
        let guard = self.records.read().map_err(poisoned)?;
        guard
            .get(id)
            .map(|record| record.points)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn len(&self) -> Result<usize, StoreError> {
        let guard = self.records.read().map_err(poisoned)?;
        Ok(guard.len())
    }
}
