//! Import and export of the board JSON payload.
//!
//! File export, clipboard copy and the paste box all share one schema and
//! one validator. A failed import never touches the current board.

use crate::board::Board;
use crate::notice::Notice;
use crate::schema;
use serde_json::Value;
use thiserror::Error;

/// Maximum number of year digits kept in an export file name.
const FILE_NAME_YEAR_DIGITS: usize = 4;

/// Import/export errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("Not valid JSON: {0}")]
    Parse(String),
    #[error("Invalid board format: {0}")]
    InvalidFormat(String),
    #[error("Could not read input: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Where an import payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    /// A selected or dropped file.
    File,
    /// Text pasted into the paste box.
    Paste,
}

impl ImportSource {
    /// Notice shown after a successful import.
    pub fn success_notice(self) -> Notice {
        match self {
            ImportSource::File => Notice::ImportedJson,
            ImportSource::Paste => Notice::PastedJson,
        }
    }

    /// Notice shown after a failed import.
    pub fn failure_notice(self, error: &SyncError) -> Notice {
        match (self, error) {
            (ImportSource::File, SyncError::InvalidFormat(_)) => Notice::InvalidJson,
            (ImportSource::File, _) => Notice::ImportFailed,
            (ImportSource::Paste, _) => Notice::InvalidJson,
        }
    }
}

/// A serialized board ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub json: String,
}

/// Collaborator that writes text to a system clipboard.
pub trait Clipboard {
    /// Returns whether the text reached the clipboard.
    fn write_text(&mut self, text: &str) -> bool;
}

/// Serialize a board for file export.
pub fn export(board: &Board) -> Result<Export, SyncError> {
    let json = board
        .to_json()
        .map_err(|e| SyncError::Serialization(e.to_string()))?;
    Ok(Export {
        file_name: export_file_name(&board.year_label),
        json,
    })
}

/// Serialize a board for the clipboard.
pub fn to_clipboard_text(board: &Board) -> Result<String, SyncError> {
    board
        .to_json_compact()
        .map_err(|e| SyncError::Serialization(e.to_string()))
}

/// Parse, validate and decode a board payload, stamping a fresh `updated_at`.
pub fn parse_board(text: &str) -> Result<Board, SyncError> {
    let value: Value = serde_json::from_str(text).map_err(|e| SyncError::Parse(e.to_string()))?;
    decode_board(value)
}

/// Validate and decode an already parsed payload.
pub fn decode_board(value: Value) -> Result<Board, SyncError> {
    schema::validate(&value)?;
    let board: Board =
        serde_json::from_value(value).map_err(|e| SyncError::InvalidFormat(e.to_string()))?;
    if board.tiers.is_empty() {
        return Err(SyncError::InvalidFormat("board has no tiers".to_string()));
    }
    if !board.is_consistent() {
        log::debug!("Imported board {} has inconsistent tier membership", board.board_id);
    }
    Ok(board.stamped())
}

/// File name for an exported board: the label's digits, at most four of
/// them, or `class` when the label has none.
pub fn export_file_name(year_label: &str) -> String {
    let digits: String = year_label
        .chars()
        .filter(char::is_ascii_digit)
        .take(FILE_NAME_YEAR_DIGITS)
        .collect();
    let stem = if digits.is_empty() { "class" } else { digits.as_str() };
    format!("rookie-board-{}.json", stem)
}
