//! Local-storage backend for the inventory store.

use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage as _};
use inventario::{InventoryRecord, STORAGE_KEY, Storage, StoreError};

/// Keeps the collection as JSON under [`STORAGE_KEY`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserStorage;

impl Storage for BrowserStorage {
    fn load(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        match LocalStorage::get::<Vec<InventoryRecord>>(STORAGE_KEY) {
            Ok(records) => Ok(records),
            Err(StorageError::KeyNotFound(_)) => Ok(Vec::new()),
            Err(StorageError::SerdeError(e)) => Err(StoreError::Serde(e)),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn save(&self, records: &[InventoryRecord]) -> Result<(), StoreError> {
        LocalStorage::set(STORAGE_KEY, records).map_err(|e| match e {
            StorageError::SerdeError(e) => StoreError::Serde(e),
            other => StoreError::Backend(other.to_string()),
        })
    }
}
