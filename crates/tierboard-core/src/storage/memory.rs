//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, value: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        let value = value.to_string();
        Box::pin(async move {
            let mut entries = self
                .entries
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            entries.insert(key, value);
            Ok(())
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>> {
        let key = key.to_string();
        Box::pin(async move {
            let entries = self
                .entries
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            entries.get(&key).cloned().ok_or(StorageError::NotFound(key))
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            let mut entries = self
                .entries
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            entries.remove(&key);
            Ok(())
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = key.to_string();
        Box::pin(async move {
            let entries = self
                .entries
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            Ok(entries.contains_key(&key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        block_on(storage.save("board", "{}")).unwrap();
        assert_eq!(block_on(storage.load("board")).unwrap(), "{}");
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();
        assert!(!block_on(storage.exists("theme")).unwrap());
        block_on(storage.save("theme", "dark")).unwrap();
        assert!(block_on(storage.exists("theme")).unwrap());
        block_on(storage.delete("theme")).unwrap();
        assert!(!block_on(storage.exists("theme")).unwrap());
    }
}
