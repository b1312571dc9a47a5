//! Metadata storage trait.

use crate::StoreError;

/// Generic key-value store for engine bookkeeping (admin snapshots, the
/// relation-table snapshot) that doesn't belong in any record table.
pub trait MetaStore {
    /// Store a metadata value.
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Retrieve a metadata value.
    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Delete a metadata entry.
    fn delete_meta(&self, key: &[u8]) -> Result<(), StoreError>;
}
