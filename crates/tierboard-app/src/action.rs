//! User actions parsed from the command line prompt.

use std::path::PathBuf;
use thiserror::Error;
use tierboard_core::{Board, PosMetaKey, Position, Tab};

/// A reference to a tier typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierRef {
    /// 1-based position, written `t2`.
    Index(usize),
    /// Raw tier id.
    Id(String),
}

/// A reference to a player typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerRef {
    /// Overall rank, written `#3`.
    Rank(usize),
    /// Raw player id.
    Id(String),
}

/// Where a player is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropRef {
    Tier(TierRef),
    Player(PlayerRef),
    /// Raw id of either kind.
    Id(String),
}

impl TierRef {
    fn parse(token: &str) -> Self {
        match token.strip_prefix('t').and_then(|n| n.parse().ok()) {
            Some(n) => TierRef::Index(n),
            None => TierRef::Id(token.to_string()),
        }
    }

    /// Tier id on `board`. Unknown references resolve to the raw text so
    /// the core treats them as a lookup miss.
    pub fn resolve(&self, board: &Board) -> String {
        match self {
            TierRef::Index(n) => n
                .checked_sub(1)
                .and_then(|i| board.tiers.get(i))
                .map(|t| t.id.clone())
                .unwrap_or_else(|| format!("t{}", n)),
            TierRef::Id(id) => id.clone(),
        }
    }
}

impl PlayerRef {
    fn parse(token: &str) -> Self {
        match token.strip_prefix('#').and_then(|n| n.parse().ok()) {
            Some(n) => PlayerRef::Rank(n),
            None => PlayerRef::Id(token.to_string()),
        }
    }

    /// Player id on `board`, resolving ranks against the flattened order.
    pub fn resolve(&self, board: &Board) -> String {
        match self {
            PlayerRef::Rank(n) => n
                .checked_sub(1)
                .and_then(|i| board.ordered_player_ids().nth(i))
                .cloned()
                .unwrap_or_else(|| format!("#{}", n)),
            PlayerRef::Id(id) => id.clone(),
        }
    }
}

impl DropRef {
    fn parse(token: &str) -> Self {
        if token.starts_with('#') {
            DropRef::Player(PlayerRef::parse(token))
        } else if let TierRef::Index(n) = TierRef::parse(token) {
            DropRef::Tier(TierRef::Index(n))
        } else {
            DropRef::Id(token.to_string())
        }
    }

    pub fn resolve(&self, board: &Board) -> String {
        match self {
            DropRef::Tier(tier) => tier.resolve(board),
            DropRef::Player(player) => player.resolve(board),
            DropRef::Id(id) => id.clone(),
        }
    }
}

/// Errors from parsing a prompt line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Unknown position '{0}' (QB, RB, WR, TE)")]
    Position(String),
    #[error("Unknown field '{0}' (zap, category, rp)")]
    Field(String),
}

/// Actions the shell can perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Redraw the current tab.
    Show,
    /// Switch tab.
    SetTab(Tab),
    ToggleTheme,
    AddTier,
    DeleteTier(TierRef),
    RenameTier(TierRef, String),
    SetTierNote(TierRef, String),
    AddPlayer(TierRef),
    SetName(PlayerRef, String),
    SetPosition(PlayerRef, Position),
    SetNotes(PlayerRef, String),
    SetMeta(PlayerRef, PosMetaKey, String),
    DeletePlayer(PlayerRef),
    /// Drag a player onto a row or tier.
    Move(PlayerRef, DropRef),
    /// Export to a file; defaults to the board's export file name.
    Export(Option<PathBuf>),
    /// Import a board file.
    Import(PathBuf),
    /// Copy the board JSON to the clipboard.
    Copy,
    /// Replace the board with pasted JSON.
    Paste(String),
    ResetBoard,
    Help,
    Quit,
}

/// Split off the first whitespace-delimited word.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (input, ""),
    }
}

fn parse_position(token: &str) -> Result<Position, ActionError> {
    match Position::parse(&token.to_uppercase()) {
        Position::Other(_) => Err(ActionError::Position(token.to_string())),
        pos => Ok(pos),
    }
}

fn parse_meta_key(token: &str) -> Result<PosMetaKey, ActionError> {
    match token.to_lowercase().as_str() {
        "zap" => Ok(PosMetaKey::Zap),
        "category" => Ok(PosMetaKey::Category),
        "rp" => Ok(PosMetaKey::Rp),
        _ => Err(ActionError::Field(token.to_string())),
    }
}

impl UiAction {
    /// Parse one prompt line. Empty lines redraw.
    pub fn parse(line: &str) -> Result<Self, ActionError> {
        let (verb, rest) = split_word(line);
        let (first, tail) = split_word(rest);

        let action = match verb {
            "" | "show" | "ls" => UiAction::Show,
            "tab" => match Tab::parse(rest).or_else(|| Tab::parse(&rest.to_uppercase())) {
                Some(tab) => UiAction::SetTab(tab),
                None if rest.eq_ignore_ascii_case("big") || rest.eq_ignore_ascii_case("board") => {
                    UiAction::SetTab(Tab::BigBoard)
                }
                None => return Err(ActionError::Usage("tab <Big Board|QB|RB|WR|TE>")),
            },
            "theme" => UiAction::ToggleTheme,
            "add-tier" => UiAction::AddTier,
            "del-tier" => {
                if first.is_empty() {
                    return Err(ActionError::Usage("del-tier <tier>"));
                }
                UiAction::DeleteTier(TierRef::parse(first))
            }
            "title" => {
                if first.is_empty() {
                    return Err(ActionError::Usage("title <tier> <text>"));
                }
                UiAction::RenameTier(TierRef::parse(first), tail.to_string())
            }
            "note" => {
                if first.is_empty() {
                    return Err(ActionError::Usage("note <tier> <text>"));
                }
                UiAction::SetTierNote(TierRef::parse(first), tail.to_string())
            }
            "add" => {
                if first.is_empty() {
                    return Err(ActionError::Usage("add <tier>"));
                }
                UiAction::AddPlayer(TierRef::parse(first))
            }
            "name" => {
                if first.is_empty() {
                    return Err(ActionError::Usage("name <player> <text>"));
                }
                UiAction::SetName(PlayerRef::parse(first), tail.to_string())
            }
            "pos" => {
                if first.is_empty() || tail.is_empty() {
                    return Err(ActionError::Usage("pos <player> <QB|RB|WR|TE>"));
                }
                UiAction::SetPosition(PlayerRef::parse(first), parse_position(tail)?)
            }
            "notes" => {
                if first.is_empty() {
                    return Err(ActionError::Usage("notes <player> <text>"));
                }
                UiAction::SetNotes(PlayerRef::parse(first), tail.to_string())
            }
            "meta" => {
                let (field, value) = split_word(tail);
                if first.is_empty() || field.is_empty() {
                    return Err(ActionError::Usage("meta <player> <zap|category|rp> <value>"));
                }
                let key = parse_meta_key(field)?;
                UiAction::SetMeta(PlayerRef::parse(first), key, value.to_string())
            }
            "del" => {
                if first.is_empty() {
                    return Err(ActionError::Usage("del <player>"));
                }
                UiAction::DeletePlayer(PlayerRef::parse(first))
            }
            "mv" | "move" => {
                if first.is_empty() || tail.is_empty() {
                    return Err(ActionError::Usage("mv <player> <player|tier>"));
                }
                UiAction::Move(PlayerRef::parse(first), DropRef::parse(tail))
            }
            "export" => UiAction::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "import" => {
                if rest.is_empty() {
                    return Err(ActionError::Usage("import <file>"));
                }
                UiAction::Import(PathBuf::from(rest))
            }
            "copy" => UiAction::Copy,
            "paste" => {
                if rest.is_empty() {
                    return Err(ActionError::Usage("paste <json>"));
                }
                UiAction::Paste(rest.to_string())
            }
            "reset" => UiAction::ResetBoard,
            "help" | "?" => UiAction::Help,
            "quit" | "exit" | "q" => UiAction::Quit,
            other => return Err(ActionError::Unknown(other.to_string())),
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_verbs() {
        assert_eq!(UiAction::parse(""), Ok(UiAction::Show));
        assert_eq!(UiAction::parse("add-tier"), Ok(UiAction::AddTier));
        assert_eq!(UiAction::parse("  quit "), Ok(UiAction::Quit));
        assert_eq!(UiAction::parse("export"), Ok(UiAction::Export(None)));
        assert!(matches!(UiAction::parse("frobnicate"), Err(ActionError::Unknown(_))));
    }

    #[test]
    fn test_parse_references() {
        assert_eq!(
            UiAction::parse("mv #3 t1"),
            Ok(UiAction::Move(PlayerRef::Rank(3), DropRef::Tier(TierRef::Index(1))))
        );
        assert_eq!(
            UiAction::parse("mv #3 #1"),
            Ok(UiAction::Move(PlayerRef::Rank(3), DropRef::Player(PlayerRef::Rank(1))))
        );
        assert_eq!(
            UiAction::parse("mv abc def"),
            Ok(UiAction::Move(PlayerRef::Id("abc".to_string()), DropRef::Id("def".to_string())))
        );
    }

    #[test]
    fn test_parse_text_arguments() {
        assert_eq!(
            UiAction::parse("title t2 Day Two Starters"),
            Ok(UiAction::RenameTier(TierRef::Index(2), "Day Two Starters".to_string()))
        );
        assert_eq!(
            UiAction::parse("meta #4 rp 1.35"),
            Ok(UiAction::SetMeta(PlayerRef::Rank(4), PosMetaKey::Rp, "1.35".to_string()))
        );
        assert_eq!(
            UiAction::parse("pos #1 te"),
            Ok(UiAction::SetPosition(PlayerRef::Rank(1), Position::Te))
        );
        assert!(matches!(UiAction::parse("pos #1 K"), Err(ActionError::Position(_))));
        assert!(matches!(UiAction::parse("del-tier"), Err(ActionError::Usage(_))));
    }

    #[test]
    fn test_parse_tabs() {
        assert_eq!(UiAction::parse("tab wr"), Ok(UiAction::SetTab(Tab::Position(Position::Wr))));
        assert_eq!(UiAction::parse("tab Big Board"), Ok(UiAction::SetTab(Tab::BigBoard)));
        assert_eq!(UiAction::parse("tab big"), Ok(UiAction::SetTab(Tab::BigBoard)));
    }

    #[test]
    fn test_resolve_against_board() {
        let board = Board::sample();
        let first_tier = board.tiers[0].id.clone();
        let third_player = board.tiers[0].player_ids[2].clone();

        assert_eq!(TierRef::Index(1).resolve(&board), first_tier);
        assert_eq!(TierRef::Index(9).resolve(&board), "t9");
        assert_eq!(TierRef::Index(0).resolve(&board), "t0");
        assert_eq!(PlayerRef::Rank(3).resolve(&board), third_player);
        assert_eq!(PlayerRef::Rank(99).resolve(&board), "#99");
    }
}
