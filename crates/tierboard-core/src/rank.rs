//! Derived ranks.
//!
//! Ranks are never stored. They are pure queries over a board snapshot and
//! are recomputed whenever tier order, membership or positions change.

use crate::board::{Board, Player, PlayerId, Position, TierId};
use std::collections::HashMap;

/// 1-based position of a player in the flattened tier order.
pub fn overall_rank(board: &Board, player_id: &str) -> Option<usize> {
    board
        .ordered_player_ids()
        .position(|id| id == player_id)
        .map(|idx| idx + 1)
}

/// Per-position counters for the single left-to-right scan.
#[derive(Debug, Default, Clone, Copy)]
struct PositionCounters {
    qb: usize,
    rb: usize,
    wr: usize,
    te: usize,
}

impl PositionCounters {
    /// Count one more player at `pos`; unsupported positions are not counted.
    fn bump(&mut self, pos: &Position) -> Option<usize> {
        let counter = match pos {
            Position::Qb => &mut self.qb,
            Position::Rb => &mut self.rb,
            Position::Wr => &mut self.wr,
            Position::Te => &mut self.te,
            Position::Other(_) => return None,
        };
        *counter += 1;
        Some(*counter)
    }
}

/// Positional rank of every ranked player.
pub fn positional_ranks(board: &Board) -> HashMap<PlayerId, usize> {
    let mut counters = PositionCounters::default();
    let mut ranks = HashMap::new();

    for id in board.ordered_player_ids() {
        let Some(player) = board.players.get(id) else {
            continue;
        };
        if let Some(rank) = counters.bump(&player.pos) {
            ranks.insert(id.clone(), rank);
        }
    }

    ranks
}

/// 1-based position of a player among same-position players.
pub fn positional_rank(board: &Board, player_id: &str) -> Option<usize> {
    positional_ranks(board).get(player_id).copied()
}

/// Overall and positional rank of one listed player.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow<'a> {
    pub tier_index: usize,
    pub overall_rank: usize,
    pub positional_rank: Option<usize>,
    pub player_id: &'a str,
    /// `None` for a listed id with no player behind it.
    pub player: Option<&'a Player>,
}

/// All listed rows of the board in overall order.
pub fn ranked_rows(board: &Board) -> Vec<RankedRow<'_>> {
    let positional = positional_ranks(board);
    let mut rows = Vec::new();
    let mut overall = 0;

    for (tier_index, tier) in board.tiers.iter().enumerate() {
        for id in &tier.player_ids {
            overall += 1;
            rows.push(RankedRow {
                tier_index,
                overall_rank: overall,
                positional_rank: positional.get(id).copied(),
                player_id: id,
                player: board.players.get(id),
            });
        }
    }

    rows
}

/// A row of the per-position view.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow<'a> {
    pub tier_id: &'a TierId,
    pub tier_title: &'a str,
    pub overall_rank: usize,
    pub player: &'a Player,
}

/// Players at `pos` in overall order, keeping their tier context.
pub fn position_rows<'a>(board: &'a Board, pos: &Position) -> Vec<PositionRow<'a>> {
    ranked_rows(board)
        .into_iter()
        .filter_map(|row| {
            let player = row.player.filter(|p| &p.pos == pos)?;
            let tier = &board.tiers[row.tier_index];
            Some(PositionRow {
                tier_id: &tier.id,
                tier_title: &tier.title,
                overall_rank: row.overall_rank,
                player,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Tier;

    fn board_with(tiers: &[&[(&str, Position)]]) -> Board {
        let mut board = Board::new();
        board.tiers.clear();
        for (i, members) in tiers.iter().enumerate() {
            let mut tier = Tier::new(format!("Tier {}", i + 1));
            tier.id = format!("T{}", i + 1);
            for (id, pos) in members.iter() {
                let mut player = Player::named(*id, pos.clone());
                player.id = id.to_string();
                tier.player_ids.push(player.id.clone());
                board.players.insert(player.id.clone(), player);
            }
            board.tiers.push(tier);
        }
        board
    }

    #[test]
    fn test_overall_rank_spans_tiers() {
        let board = board_with(&[
            &[("P1", Position::Qb), ("P2", Position::Wr)],
            &[],
            &[("P3", Position::Rb)],
        ]);
        assert_eq!(overall_rank(&board, "P1"), Some(1));
        assert_eq!(overall_rank(&board, "P2"), Some(2));
        assert_eq!(overall_rank(&board, "P3"), Some(3));
        assert_eq!(overall_rank(&board, "missing"), None);
    }

    #[test]
    fn test_positional_rank_scan() {
        let board = board_with(&[
            &[("A", Position::Qb), ("B", Position::Wr)],
            &[("C", Position::Wr), ("D", Position::Rb), ("E", Position::Wr)],
        ]);
        let ranks: Vec<_> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|id| positional_rank(&board, id))
            .collect();
        assert_eq!(ranks, vec![Some(1), Some(1), Some(2), Some(1), Some(3)]);
    }

    #[test]
    fn test_unsupported_positions_are_unranked() {
        let board = board_with(&[&[
            ("K1", Position::Other("K".to_string())),
            ("T1", Position::Te),
            ("T2", Position::Te),
        ]]);
        assert_eq!(positional_rank(&board, "K1"), None);
        assert_eq!(positional_rank(&board, "T1"), Some(1));
        assert_eq!(positional_rank(&board, "T2"), Some(2));
        assert_eq!(overall_rank(&board, "T1"), Some(2));
    }

    #[test]
    fn test_orphans_and_dangling_ids() {
        let mut board = board_with(&[&[("A", Position::Wr)]]);
        board.tiers[0].player_ids.insert(0, "ghost".to_string());
        let orphan = Player::named("Orphan", Position::Wr);
        board.players.insert("orphan".to_string(), orphan);

        // A dangling id still occupies a slot in overall order.
        assert_eq!(overall_rank(&board, "A"), Some(2));
        assert_eq!(positional_rank(&board, "A"), Some(1));
        assert_eq!(overall_rank(&board, "orphan"), None);
        assert_eq!(positional_rank(&board, "orphan"), None);
    }

    #[test]
    fn test_rank_monotonicity() {
        let board = board_with(&[
            &[("A", Position::Wr), ("B", Position::Qb), ("C", Position::Wr)],
            &[("D", Position::Te), ("E", Position::Wr), ("F", Position::Qb)],
        ]);
        let rows = ranked_rows(&board);
        for pair in rows.windows(2) {
            assert!(pair[0].overall_rank < pair[1].overall_rank);
        }
        for pos in Position::SUPPORTED.iter() {
            let same: Vec<_> = rows
                .iter()
                .filter(|r| r.player.is_some_and(|p| &p.pos == pos))
                .collect();
            for (i, row) in same.iter().enumerate() {
                assert_eq!(row.positional_rank, Some(i + 1));
            }
        }
    }

    #[test]
    fn test_position_rows() {
        let board = board_with(&[
            &[("A", Position::Wr), ("B", Position::Qb)],
            &[("C", Position::Wr)],
        ]);
        let rows = position_rows(&board, &Position::Wr);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player.id, "A");
        assert_eq!(rows[0].overall_rank, 1);
        assert_eq!(rows[0].tier_title, "Tier 1");
        assert_eq!(rows[1].player.id, "C");
        assert_eq!(rows[1].overall_rank, 3);
        assert_eq!(rows[1].tier_id, "T2");

        assert!(position_rows(&board, &Position::Te).is_empty());
    }
}
