//! Typed board commands.
//!
//! Each UI affordance maps onto one [`Command`]. Applying a command to a
//! board never fails: it yields the next board (the same board when nothing
//! changed), plus the notice to show, if any.

use crate::board::{Board, PlayerId, TierId};
use crate::editor::{self, EditError, PlayerPatch, TierPatch};
use crate::notice::Notice;
use crate::reorder::{self, MovePlan};
use crate::sync::{self, Export, ImportSource};

/// A board command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddTier,
    DeleteTier {
        tier_id: TierId,
    },
    UpdateTier {
        tier_id: TierId,
        patch: TierPatch,
    },
    AddPlayer {
        tier_id: TierId,
    },
    UpdatePlayer {
        player_id: PlayerId,
        patch: PlayerPatch,
    },
    DeletePlayer {
        player_id: PlayerId,
    },
    MoveSameTier {
        player_id: PlayerId,
        over_player_id: PlayerId,
    },
    MoveCrossTier {
        player_id: PlayerId,
        tier_id: TierId,
    },
    Import {
        text: String,
        source: ImportSource,
    },
    Export,
    ResetBoard,
}

impl Command {
    /// Command for a finished drag, or `None` when the drop is a no-op.
    pub fn from_drop(board: &Board, source: &str, target: &str) -> Option<Self> {
        Some(match reorder::plan_move(board, source, target)? {
            MovePlan::SameTier {
                player_id,
                over_player_id,
            } => Command::MoveSameTier {
                player_id,
                over_player_id,
            },
            MovePlan::CrossTier { player_id, tier_id } => {
                Command::MoveCrossTier { player_id, tier_id }
            }
        })
    }
}

/// Result of applying a command.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub board: Board,
    pub changed: bool,
    pub notice: Option<Notice>,
    /// Serialized board for `Command::Export`.
    pub export: Option<Export>,
}

impl Outcome {
    fn changed(board: Board, notice: Option<Notice>) -> Self {
        Self {
            board,
            changed: true,
            notice,
            export: None,
        }
    }

    fn unchanged(board: &Board, notice: Option<Notice>) -> Self {
        Self {
            board: board.clone(),
            changed: false,
            notice,
            export: None,
        }
    }

    fn from_edit(board: &Board, result: Result<Board, EditError>, notice: Option<Notice>) -> Self {
        match result {
            Ok(next) => Self::changed(next, notice),
            Err(EditError::LastTier) => Self::unchanged(board, Some(Notice::NeedOneTier)),
            Err(e) => {
                log::debug!("Edit skipped: {}", e);
                Self::unchanged(board, None)
            }
        }
    }

    fn from_move(board: &Board, result: Option<Board>) -> Self {
        match result {
            Some(next) => Self::changed(next, None),
            None => Self::unchanged(board, None),
        }
    }
}

/// Apply a command to a board snapshot.
pub fn apply(board: &Board, command: Command) -> Outcome {
    match command {
        Command::AddTier => Outcome::changed(editor::add_tier(board), Some(Notice::TierAdded)),
        Command::DeleteTier { tier_id } => {
            let outcome = Outcome::from_edit(
                board,
                editor::delete_tier(board, &tier_id),
                Some(Notice::TierDeleted),
            );
            if outcome.changed {
                log::info!("Deleted tier {}", tier_id);
            }
            outcome
        }
        Command::UpdateTier { tier_id, patch } => {
            Outcome::from_edit(board, editor::update_tier(board, &tier_id, &patch), None)
        }
        Command::AddPlayer { tier_id } => {
            let result = editor::add_player(board, &tier_id).map(|(next, _)| next);
            Outcome::from_edit(board, result, Some(Notice::PlayerAdded))
        }
        Command::UpdatePlayer { player_id, patch } => {
            Outcome::from_edit(board, editor::update_player(board, &player_id, &patch), None)
        }
        Command::DeletePlayer { player_id } => Outcome::from_edit(
            board,
            editor::delete_player(board, &player_id),
            Some(Notice::PlayerRemoved),
        ),
        Command::MoveSameTier {
            player_id,
            over_player_id,
        } => Outcome::from_move(
            board,
            reorder::reorder_within_tier(board, &player_id, &over_player_id),
        ),
        Command::MoveCrossTier { player_id, tier_id } => {
            Outcome::from_move(board, reorder::move_to_tier(board, &player_id, &tier_id))
        }
        Command::Import { text, source } => match sync::parse_board(&text) {
            Ok(next) => {
                log::info!("Imported board {} ({} tiers)", next.board_id, next.tiers.len());
                Outcome::changed(next, Some(source.success_notice()))
            }
            Err(e) => {
                log::warn!("Import rejected: {}", e);
                Outcome::unchanged(board, Some(source.failure_notice(&e)))
            }
        },
        Command::Export => match sync::export(board) {
            Ok(export) => Outcome {
                export: Some(export),
                ..Outcome::unchanged(board, Some(Notice::ExportedJson))
            },
            Err(e) => {
                log::error!("Export failed: {}", e);
                Outcome::unchanged(board, None)
            }
        },
        Command::ResetBoard => Outcome::changed(Board::sample(), Some(Notice::ResetBoard)),
    }
}
