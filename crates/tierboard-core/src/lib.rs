//! Tierboard Core Library
//!
//! Platform-agnostic board model and reordering engine for a tiered rookie
//! ranking board: tiers and players, derived ranks, drag-and-drop
//! resolution, structural edits and JSON import/export.

pub mod app_state;
pub mod board;
pub mod collision;
pub mod command;
pub mod drag;
pub mod editor;
pub mod notice;
pub mod rank;
pub mod reorder;
pub mod schema;
pub mod storage;
pub mod sync;

pub use app_state::{AppState, Preferences, Tab, Theme};
pub use board::{Board, Player, PlayerId, PosMeta, PosMetaKey, Position, Tier, TierId};
pub use collision::{CollisionStrategy, Droppable, RowsFirst};
pub use command::{Command, Outcome};
pub use drag::{DragPhase, DragSession, Sensor};
pub use editor::{EditError, PlayerPatch, TierPatch};
pub use notice::{NOTICE_DURATION, Notice};
pub use storage::{FileStorage, MemoryStorage, Persistence, Storage, StorageError};
pub use sync::{Clipboard, Export, ImportSource, SyncError};
