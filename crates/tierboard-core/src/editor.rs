//! Structural edits: tier and player create, update and delete.
//!
//! Each edit takes a board snapshot and returns a new, freshly stamped
//! board. Refusals leave the snapshot as it was.

use crate::board::{Board, Player, PlayerId, PosMeta, Position, Tier, default_tier_title};
use thiserror::Error;

/// Why an edit was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Deleting the sole tier would leave the board without one.
    #[error("a board needs at least one tier")]
    LastTier,
    #[error("no tier with id {0}")]
    UnknownTier(String),
    #[error("no player with id {0}")]
    UnknownPlayer(String),
}

impl EditError {
    /// Lookup misses come from stale UI events and are not shown to users.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, EditError::UnknownTier(_) | EditError::UnknownPlayer(_))
    }
}

/// Field patch for a tier. Unset fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierPatch {
    pub title: Option<String>,
    pub note: Option<String>,
}

impl TierPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn note(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::default()
        }
    }

    fn apply_to(&self, tier: &mut Tier) {
        if let Some(title) = &self.title {
            tier.title = title.clone();
        }
        if let Some(note) = &self.note {
            tier.note = note.clone();
        }
    }
}

/// Field patch for a player. Unset fields are kept; `pos_meta` replaces the
/// whole map, so build it with [`PosMeta::with`] to change a single key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub pos: Option<Position>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub pos_meta: Option<PosMeta>,
}

impl PlayerPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn pos(pos: Position) -> Self {
        Self {
            pos: Some(pos),
            ..Self::default()
        }
    }

    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    pub fn pos_meta(pos_meta: PosMeta) -> Self {
        Self {
            pos_meta: Some(pos_meta),
            ..Self::default()
        }
    }

    fn apply_to(&self, player: &mut Player) {
        if let Some(name) = &self.name {
            player.name = name.clone();
        }
        if let Some(pos) = &self.pos {
            player.pos = pos.clone();
        }
        if let Some(notes) = &self.notes {
            player.notes = notes.clone();
        }
        if let Some(tags) = &self.tags {
            player.tags = tags.clone();
        }
        if let Some(pos_meta) = &self.pos_meta {
            player.pos_meta = pos_meta.clone();
        }
    }
}

/// Append an empty tier titled after the current tier count.
///
/// Titles are fixed at creation; later deletes do not renumber them.
pub fn add_tier(board: &Board) -> Board {
    let mut next = board.clone();
    next.tiers.push(Tier::new(default_tier_title(board.tiers.len())));
    next.stamped()
}

/// Delete a tier, migrating its players to the end of the previous tier,
/// or of the second tier when the first is deleted.
pub fn delete_tier(board: &Board, tier_id: &str) -> Result<Board, EditError> {
    if board.tiers.len() <= 1 {
        return Err(EditError::LastTier);
    }
    let idx = board
        .tier_index(tier_id)
        .ok_or_else(|| EditError::UnknownTier(tier_id.to_string()))?;
    let target_idx = if idx > 0 { idx - 1 } else { 1 };

    let mut next = board.clone();
    let migrated = next.tiers[idx].player_ids.clone();
    next.tiers[target_idx].player_ids.extend(migrated);
    next.tiers.remove(idx);
    Ok(next.stamped())
}

/// Merge a patch into a tier.
pub fn update_tier(board: &Board, tier_id: &str, patch: &TierPatch) -> Result<Board, EditError> {
    let idx = board
        .tier_index(tier_id)
        .ok_or_else(|| EditError::UnknownTier(tier_id.to_string()))?;
    let mut next = board.clone();
    patch.apply_to(&mut next.tiers[idx]);
    Ok(next.stamped())
}

/// Create a blank player at the end of a tier. Returns the new player's id.
pub fn add_player(board: &Board, tier_id: &str) -> Result<(Board, PlayerId), EditError> {
    let idx = board
        .tier_index(tier_id)
        .ok_or_else(|| EditError::UnknownTier(tier_id.to_string()))?;
    let player = Player::new();
    let player_id = player.id.clone();

    let mut next = board.clone();
    next.tiers[idx].player_ids.push(player_id.clone());
    next.players.insert(player_id.clone(), player);
    Ok((next.stamped(), player_id))
}

/// Merge a patch into a player.
pub fn update_player(
    board: &Board,
    player_id: &str,
    patch: &PlayerPatch,
) -> Result<Board, EditError> {
    if !board.is_player(player_id) {
        return Err(EditError::UnknownPlayer(player_id.to_string()));
    }
    let mut next = board.clone();
    if let Some(player) = next.players.get_mut(player_id) {
        patch.apply_to(player);
    }
    Ok(next.stamped())
}

/// Remove a player and scrub its id from every tier.
pub fn delete_player(board: &Board, player_id: &str) -> Result<Board, EditError> {
    let listed = board.tier_index_of_player(player_id).is_some();
    if !board.is_player(player_id) && !listed {
        return Err(EditError::UnknownPlayer(player_id.to_string()));
    }
    let mut next = board.clone();
    next.players.remove(player_id);
    for tier in &mut next.tiers {
        tier.player_ids.retain(|id| id != player_id);
    }
    Ok(next.stamped())
}
