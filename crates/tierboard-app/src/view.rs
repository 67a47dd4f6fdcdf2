//! Text rendering of the board tabs.

use std::fmt::Write;
use tierboard_core::rank::{position_rows, ranked_rows};
use tierboard_core::{AppState, Board, Notice, PosMetaKey, Position, Tab};

const NAME_WIDTH: usize = 24;

/// Render the tab strip, the active tab and the visible notice.
pub fn render(state: &AppState, title: &str) -> String {
    let prefs = state.preferences();
    let board = state.board();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} :: {} [{}] updated {}",
        title,
        board.year_label,
        prefs.theme.as_str(),
        board.updated_at
    );
    out.push_str(&render_tabs(&prefs.active_tab));
    out.push('\n');

    match &prefs.active_tab {
        Tab::BigBoard => out.push_str(&render_big_board(board)),
        Tab::Position(pos) => out.push_str(&render_position(board, pos)),
    }

    if let Some(notice) = state.notice() {
        out.push_str(&render_notice(notice));
    }
    out
}

fn render_tabs(active: &Tab) -> String {
    let labels: Vec<String> = Tab::all()
        .iter()
        .map(|tab| {
            if tab == active {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect();
    labels.join("  ")
}

/// Every tier with its players, each row showing overall and positional rank.
pub fn render_big_board(board: &Board) -> String {
    let rows = ranked_rows(board);
    let mut out = String::new();

    for (index, tier) in board.tiers.iter().enumerate() {
        let _ = write!(out, "\nt{} {}", index + 1, tier.title);
        if !tier.note.is_empty() {
            let _ = write!(out, " ({})", tier.note);
        }
        out.push('\n');

        // Ids with no player behind them keep their rank slot but get no row.
        for row in rows.iter().filter(|r| r.tier_index == index) {
            let Some(player) = row.player else {
                continue;
            };
            let positional = row
                .positional_rank
                .map(|n| format!("{}{}", player.pos, n))
                .unwrap_or_default();
            let _ = write!(
                out,
                "  #{:<3} {:<5} {:<width$}",
                row.overall_rank,
                positional,
                player.display_name(),
                width = NAME_WIDTH
            );
            if !player.notes.is_empty() {
                let _ = write!(out, " {}", player.notes);
            }
            out.push('\n');
        }
        if tier.player_ids.is_empty() {
            out.push_str("  (drop players here)\n");
        }
    }
    out
}

/// Players of one position in board order, with their position fields.
/// The RP column only appears for WR.
pub fn render_position(board: &Board, pos: &Position) -> String {
    let rows = position_rows(board, pos);
    let show_rp = *pos == Position::Wr;
    let mut out = String::new();

    let _ = write!(
        out,
        "\n  {:<12} {:<5} {:<width$}",
        "Tier",
        "Rank",
        "Player",
        width = NAME_WIDTH
    );
    if show_rp {
        let _ = write!(out, " {:<8}", PosMetaKey::Rp.label());
    }
    let _ = writeln!(out, " {:<8} {}", PosMetaKey::Zap.label(), PosMetaKey::Category.label());

    if rows.is_empty() {
        let _ = writeln!(out, "  No {} players yet.", pos);
        return out;
    }

    for row in rows {
        let meta = &row.player.pos_meta;
        let _ = write!(
            out,
            "  {:<12} #{:<4} {:<width$}",
            row.tier_title,
            row.overall_rank,
            row.player.display_name(),
            width = NAME_WIDTH
        );
        if show_rp {
            let _ = write!(out, " {:<8}", meta.get(PosMetaKey::Rp).unwrap_or("-"));
        }
        let _ = writeln!(
            out,
            " {:<8} {}",
            meta.get(PosMetaKey::Zap).unwrap_or("-"),
            meta.get(PosMetaKey::Category).unwrap_or("-")
        );
    }
    out
}

fn render_notice(notice: Notice) -> String {
    format!("\n>> {}\n", notice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tierboard_core::{Command, Preferences};

    #[test]
    fn test_big_board_lists_ranks() {
        let text = render_big_board(&Board::sample());
        assert!(text.contains("t1 Tier 1"));
        assert!(text.contains("#1   RB1"));
        assert!(text.contains("Jeremiah Love"));
        assert!(text.contains("#4   WR2"));
        assert!(text.contains("(drop players here)"));
    }

    #[test]
    fn test_big_board_skips_dangling_ids() {
        let mut board = Board::sample();
        board.tiers[0].player_ids.insert(0, "ghost".to_string());
        board.tiers[1].player_ids.push("gone".to_string());

        let text = render_big_board(&board);
        assert!(!text.contains("ghost"));
        assert!(!text.contains("gone"));
        // The dangling id still takes rank 1.
        assert!(text.contains("#2   RB1"));
        assert!(!text.contains("(drop players here)"));
    }

    #[test]
    fn test_position_view_rp_only_for_wr() {
        let board = Board::sample();
        let wr = render_position(&board, &Position::Wr);
        assert!(wr.contains("RP"));
        assert!(wr.contains("Makai Lemon"));
        assert!(!wr.contains("Jeremiah Love"));

        let rb = render_position(&board, &Position::Rb);
        assert!(!rb.contains("RP"));

        let te = render_position(&board, &Position::Te);
        assert!(te.contains("No TE players yet."));
    }

    #[test]
    fn test_render_shows_active_tab_and_notice() {
        let mut state = AppState::new(Board::sample(), Preferences::default());
        state.dispatch(Command::AddTier, Instant::now());
        let text = render(&state, "Tierboard");
        assert!(text.contains("[Big Board]"));
        assert!(text.contains(">> Tier Added"));
        assert!(text.contains("t3 Tier 3"));
    }
}
