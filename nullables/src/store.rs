//! Nullable store — thread-safe in-memory storage for testing.

use helm_store::{MetaStore, OperationStore, StoreError};
use helm_types::OperationId;
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory operation + meta store for testing.
///
/// Backs the persistence contract of both engines without touching disk;
/// "restarting" is loading a fresh engine from the same store instance.
pub struct NullGateStore {
    operations: Mutex<HashMap<[u8; 32], Vec<u8>>>,
    meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl NullGateStore {
    pub fn new() -> Self {
        Self {
            operations: Mutex::new(HashMap::new()),
            meta: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for NullGateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationStore for NullGateStore {
    fn get_operation(&self, id: &OperationId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.operations.lock().unwrap().get(id.as_bytes()).cloned())
    }

    fn put_operation(&self, id: &OperationId, record: &[u8]) -> Result<(), StoreError> {
        self.operations
            .lock()
            .unwrap()
            .insert(*id.as_bytes(), record.to_vec());
        Ok(())
    }

    fn delete_operation(&self, id: &OperationId) -> Result<(), StoreError> {
        self.operations.lock().unwrap().remove(id.as_bytes());
        Ok(())
    }

    fn iter_operations(&self) -> Result<Vec<(OperationId, Vec<u8>)>, StoreError> {
        Ok(self
            .operations
            .lock()
            .unwrap()
            .iter()
            .map(|(id, bytes)| (OperationId::new(*id), bytes.clone()))
            .collect())
    }
}

impl MetaStore for NullGateStore {
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta
            .lock()
            .unwrap()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn delete_meta(&self, key: &[u8]) -> Result<(), StoreError> {
        self.meta.lock().unwrap().remove(key);
        Ok(())
    }
}
