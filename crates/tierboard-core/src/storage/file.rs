//! File-based storage implementation for native platforms.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage.
///
/// Each key is stored as its own `.json` file in a base directory.
pub struct FileStorage {
    /// Base directory for stored values.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/tierboard/`
    /// On Windows: `%LOCALAPPDATA%\tierboard\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("tierboard"))
    }

    /// Get the file path for a key.
    fn key_path(&self, key: &str) -> PathBuf {
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_key))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, key: &str, value: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.key_path(key);
        let value = value.to_string();

        Box::pin(async move {
            fs::write(&path, value).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>> {
        let path = self.key_path(key);
        let key = key.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(key));
            }
            fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.key_path(key);

        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.key_path(key);
        Box::pin(async move { Ok(path.exists()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        block_on(storage.save("rookie_board_v1", "{\"version\":1}")).unwrap();
        let loaded = block_on(storage.load("rookie_board_v1")).unwrap();

        assert_eq!(loaded, "{\"version\":1}");
        assert!(dir.path().join("rookie_board_v1.json").exists());
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();
        assert!(nested.exists());
        assert_eq!(storage.base_path(), nested.as_path());
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        block_on(storage.save("theme", "light")).unwrap();
        assert!(block_on(storage.exists("theme")).unwrap());

        block_on(storage.delete("theme")).unwrap();
        assert!(!block_on(storage.exists("theme")).unwrap());
        block_on(storage.delete("theme")).unwrap();
    }

    #[test]
    fn test_file_storage_sanitizes_key() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        block_on(storage.save("../escape:key", "x")).unwrap();
        assert_eq!(block_on(storage.load("../escape:key")).unwrap(), "x");
        assert!(dir.path().join("___escape_key.json").exists());
    }
}
