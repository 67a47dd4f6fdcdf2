//! Turning a resolved drop into a tier mutation.
//!
//! A drop names a source player and a target, which is either another
//! player's row or a tier container. Dropping onto a row in the same tier
//! is a stable array move; anything else moves the player to the end of the
//! target tier. Every function here takes a board snapshot and returns a new
//! board, leaving the snapshot untouched.

use crate::board::{Board, PlayerId, TierId};

/// A drop classified against a board snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovePlan {
    /// Reorder within one tier.
    SameTier {
        player_id: PlayerId,
        over_player_id: PlayerId,
    },
    /// Move to the end of another tier, or of its own tier when dropped on
    /// the container.
    CrossTier { player_id: PlayerId, tier_id: TierId },
}

/// Classify a drop. `None` when the drop is a no-op: dropping onto itself,
/// or an id that no longer resolves.
pub fn plan_move(board: &Board, source: &str, target: &str) -> Option<MovePlan> {
    if source == target {
        return None;
    }

    let Some(source_tier) = board.tier_index_of_player(source) else {
        log::debug!("Drop ignored: source {} is in no tier", source);
        return None;
    };

    let over_player = board.is_player(target);
    let target_tier = if over_player {
        board.tier_index_of_player(target)
    } else {
        board.tier_index(target)
    };
    let Some(target_tier) = target_tier else {
        log::debug!("Drop ignored: target {} resolves to no tier", target);
        return None;
    };

    if source_tier == target_tier && over_player {
        Some(MovePlan::SameTier {
            player_id: source.to_string(),
            over_player_id: target.to_string(),
        })
    } else {
        Some(MovePlan::CrossTier {
            player_id: source.to_string(),
            tier_id: board.tiers[target_tier].id.clone(),
        })
    }
}

/// Move the element at `from` so that it ends up at `to`, shifting the
/// elements in between.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut next = items.to_vec();
    if from >= next.len() || to >= next.len() {
        return next;
    }
    let item = next.remove(from);
    next.insert(to, item);
    next
}

/// Reorder a player onto another row of the same tier.
pub fn reorder_within_tier(board: &Board, player_id: &str, over_player_id: &str) -> Option<Board> {
    if player_id == over_player_id {
        return None;
    }
    let tier_index = board.tier_index_of_player(player_id)?;
    let tier = &board.tiers[tier_index];
    let from = tier.position_of(player_id)?;
    let to = tier.position_of(over_player_id)?;

    let mut next = board.clone();
    next.tiers[tier_index].player_ids = array_move(&tier.player_ids, from, to);
    Some(next.stamped())
}

/// Move a player to the end of a tier.
pub fn move_to_tier(board: &Board, player_id: &str, tier_id: &str) -> Option<Board> {
    let from_tier = board.tier_index_of_player(player_id)?;
    let to_tier = board.tier_index(tier_id)?;

    let mut next = board.clone();
    next.tiers[from_tier].player_ids.retain(|id| id != player_id);
    next.tiers[to_tier].player_ids.push(player_id.to_string());
    Some(next.stamped())
}

/// Apply a planned move.
pub fn apply_plan(board: &Board, plan: &MovePlan) -> Option<Board> {
    match plan {
        MovePlan::SameTier {
            player_id,
            over_player_id,
        } => reorder_within_tier(board, player_id, over_player_id),
        MovePlan::CrossTier { player_id, tier_id } => move_to_tier(board, player_id, tier_id),
    }
}

/// Resolve and apply a drop in one step.
pub fn move_player(board: &Board, source: &str, target: &str) -> Option<Board> {
    let plan = plan_move(board, source, target)?;
    apply_plan(board, &plan)
}
