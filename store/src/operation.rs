//! Scheduled-operation storage trait.

use crate::StoreError;
use helm_types::OperationId;

/// Store trait for persisting the timelock's operation table.
///
/// Records are opaque `Vec<u8>` so the store doesn't depend on the
/// `helm-timelock` crate (which would create a circular dependency); the
/// queue serializes/deserializes its own records.
pub trait OperationStore {
    fn get_operation(&self, id: &OperationId) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_operation(&self, id: &OperationId, record: &[u8]) -> Result<(), StoreError>;
    fn delete_operation(&self, id: &OperationId) -> Result<(), StoreError>;
    fn iter_operations(&self) -> Result<Vec<(OperationId, Vec<u8>)>, StoreError>;
}
