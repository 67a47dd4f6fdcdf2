//! Board and preference persistence on top of a storage backend.
//!
//! Loading never fails: a missing or unreadable board means "nothing
//! saved" and the caller seeds a sample board. Saving is best-effort and
//! failures are only logged.

use crate::app_state::{Preferences, Tab, Theme};
use crate::board::Board;
use crate::storage::{FileStorage, Storage, StorageError, StorageResult};
use std::sync::Arc;

/// Key holding the board JSON.
pub const BOARD_KEY: &str = "rookie_board_v1";
/// Key holding the theme name.
pub const THEME_KEY: &str = "rookie_theme";
/// Key holding the active tab label.
pub const ACTIVE_TAB_KEY: &str = "rookie_active_tab";

/// Loads and saves the board and preferences.
pub struct Persistence<S: Storage> {
    storage: Arc<S>,
}

impl<S: Storage> Persistence<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// The saved board, if one exists and parses.
    pub async fn load_board(&self) -> Option<Board> {
        let text = match self.storage.load(BOARD_KEY).await {
            Ok(text) => text,
            Err(StorageError::NotFound(_)) => return None,
            Err(e) => {
                log::warn!("Could not read saved board: {}", e);
                return None;
            }
        };
        match Board::from_json(&text) {
            Ok(board) => Some(board),
            Err(e) => {
                log::warn!("Ignoring unreadable saved board: {}", e);
                None
            }
        }
    }

    /// The saved board, or a fresh sample board.
    pub async fn load_board_or_sample(&self) -> Board {
        match self.load_board().await {
            Some(board) => board,
            None => {
                log::info!("No saved board, starting from the sample board");
                Board::sample()
            }
        }
    }

    /// Save the board, logging any failure.
    pub async fn save_board(&self, board: &Board) {
        if let Err(e) = self.try_save_board(board).await {
            log::warn!("Failed to save board: {}", e);
        }
    }

    async fn try_save_board(&self, board: &Board) -> StorageResult<()> {
        let json = board
            .to_json_compact()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.save(BOARD_KEY, &json).await
    }

    /// Saved preferences; missing or unknown values fall back to defaults.
    pub async fn load_preferences(&self) -> Preferences {
        let theme = self
            .storage
            .load(THEME_KEY)
            .await
            .map(|v| Theme::parse(&v))
            .unwrap_or_default();
        let active_tab = self
            .storage
            .load(ACTIVE_TAB_KEY)
            .await
            .ok()
            .and_then(|v| Tab::parse(&v))
            .unwrap_or_default();
        Preferences { theme, active_tab }
    }

    /// Save preferences, logging any failure.
    pub async fn save_preferences(&self, preferences: &Preferences) {
        if let Err(e) = self.storage.save(THEME_KEY, preferences.theme.as_str()).await {
            log::warn!("Failed to save theme: {}", e);
        }
        if let Err(e) = self
            .storage
            .save(ACTIVE_TAB_KEY, preferences.active_tab.label())
            .await
        {
            log::warn!("Failed to save active tab: {}", e);
        }
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Create the native storage backend in the default location.
pub fn create_default_storage() -> StorageResult<Arc<FileStorage>> {
    Ok(Arc::new(FileStorage::default_location()?))
}
