//! Board document: tiers, players and the persisted JSON shape.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Schema version written to and required from every board payload.
pub const BOARD_VERSION: u32 = 1;

/// Year label of a freshly seeded board.
pub const DEFAULT_YEAR_LABEL: &str = "2026 Rookie Class";

/// Opaque player identifier.
pub type PlayerId = String;
/// Opaque tier identifier.
pub type TierId = String;

/// Generate a fresh opaque identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Default title for the tier created at `index` (0-based).
pub fn default_tier_title(index: usize) -> String {
    format!("Tier {}", index + 1)
}

/// Player position.
///
/// Only the four supported positions take part in positional ranking.
/// Anything else read from an imported board is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Position {
    Qb,
    Rb,
    #[default]
    Wr,
    Te,
    Other(String),
}

impl Position {
    /// The supported positions, in tab order.
    pub const SUPPORTED: [Position; 4] = [Position::Qb, Position::Rb, Position::Wr, Position::Te];

    /// Parse a position label; unknown labels become `Other`.
    pub fn parse(label: &str) -> Self {
        match label {
            "QB" => Position::Qb,
            "RB" => Position::Rb,
            "WR" => Position::Wr,
            "TE" => Position::Te,
            other => Position::Other(other.to_string()),
        }
    }

    /// Wire label of the position.
    pub fn as_str(&self) -> &str {
        match self {
            Position::Qb => "QB",
            Position::Rb => "RB",
            Position::Wr => "WR",
            Position::Te => "TE",
            Position::Other(label) => label,
        }
    }

    /// Whether this is one of the four ranked positions.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Position::Other(_))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Position::parse(&label))
    }
}

/// Keys of the per-position metadata map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosMetaKey {
    Zap,
    Category,
    /// Only meaningful for wide receivers.
    Rp,
}

impl PosMetaKey {
    pub fn label(self) -> &'static str {
        match self {
            PosMetaKey::Zap => "ZAP",
            PosMetaKey::Category => "Category",
            PosMetaKey::Rp => "RP",
        }
    }
}

/// Position-specific scouting fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosMeta {
    #[serde(rename = "ZAP", default, skip_serializing_if = "Option::is_none")]
    pub zap: Option<String>,
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "RP", default, skip_serializing_if = "Option::is_none")]
    pub rp: Option<String>,
}

impl PosMeta {
    /// Metadata with all three keys present and empty.
    pub fn blank() -> Self {
        Self {
            zap: Some(String::new()),
            category: Some(String::new()),
            rp: Some(String::new()),
        }
    }

    /// Read a field; absent keys read as `None`.
    pub fn get(&self, key: PosMetaKey) -> Option<&str> {
        match key {
            PosMetaKey::Zap => self.zap.as_deref(),
            PosMetaKey::Category => self.category.as_deref(),
            PosMetaKey::Rp => self.rp.as_deref(),
        }
    }

    /// Copy of this metadata with one field replaced.
    pub fn with(&self, key: PosMetaKey, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match key {
            PosMetaKey::Zap => &mut next.zap,
            PosMetaKey::Category => &mut next.category,
            PosMetaKey::Rp => &mut next.rp,
        };
        *slot = Some(value.into());
        next
    }
}

/// A draft-eligible player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pos: Position,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pos_meta: PosMeta,
}

impl Player {
    /// A blank player as created from the "+ Player" affordance.
    pub fn new() -> Self {
        Self {
            id: new_id(),
            name: String::new(),
            pos: Position::Wr,
            notes: String::new(),
            tags: Vec::new(),
            pos_meta: PosMeta::blank(),
        }
    }

    /// A named player at the given position.
    pub fn named(name: impl Into<String>, pos: Position) -> Self {
        Self {
            name: name.into(),
            pos,
            ..Self::new()
        }
    }

    /// Display name, falling back for players not yet named.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { "Unnamed" } else { &self.name }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered bucket of players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub id: TierId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub player_ids: Vec<PlayerId>,
}

impl Tier {
    /// An empty tier with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            note: String::new(),
            player_ids: Vec::new(),
        }
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.player_ids.iter().any(|id| id == player_id)
    }

    pub fn position_of(&self, player_id: &str) -> Option<usize> {
        self.player_ids.iter().position(|id| id == player_id)
    }
}

/// The root aggregate: tiers, players and board metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(deserialize_with = "lenient_version")]
    pub version: u32,
    #[serde(default)]
    pub board_id: String,
    #[serde(default)]
    pub year_label: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: u64,
    pub tiers: Vec<Tier>,
    pub players: BTreeMap<PlayerId, Player>,
}

/// Accept an integral JSON number for `version`, so `1.0` reads as `1`.
fn lenient_version<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(serde::de::Error::custom(format!("invalid version {}", value)))
    }
}

/// Accept any JSON number (or nothing) for `updatedAt`.
fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        .unwrap_or(0))
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board with a single empty tier.
    pub fn new() -> Self {
        Self {
            version: BOARD_VERSION,
            board_id: new_id(),
            year_label: DEFAULT_YEAR_LABEL.to_string(),
            updated_at: now_millis(),
            tiers: vec![Tier::new(default_tier_title(0))],
            players: BTreeMap::new(),
        }
    }

    /// The seed board shown when nothing has been saved yet.
    pub fn sample() -> Self {
        let seeds = [
            Player::named("Jeremiah Love", Position::Rb),
            Player::named("Fernando Mendoza", Position::Qb),
            Player::named("Makai Lemon", Position::Wr),
            Player::named("Carnell Tate", Position::Wr),
        ];

        let mut first = Tier::new(default_tier_title(0));
        first.player_ids = seeds.iter().map(|p| p.id.clone()).collect();
        let second = Tier::new(default_tier_title(1));

        Self {
            version: BOARD_VERSION,
            board_id: new_id(),
            year_label: DEFAULT_YEAR_LABEL.to_string(),
            updated_at: now_millis(),
            tiers: vec![first, second],
            players: seeds.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    /// Copy of the board with a fresh `updated_at`.
    pub fn stamped(mut self) -> Self {
        self.updated_at = now_millis();
        self
    }

    pub fn tier(&self, id: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.id == id)
    }

    pub fn tier_index(&self, id: &str) -> Option<usize> {
        self.tiers.iter().position(|t| t.id == id)
    }

    /// Index of the first tier listing the player.
    pub fn tier_index_of_player(&self, player_id: &str) -> Option<usize> {
        self.tiers.iter().position(|t| t.contains(player_id))
    }

    pub fn tier_of_player(&self, player_id: &str) -> Option<&Tier> {
        self.tier_index_of_player(player_id).map(|i| &self.tiers[i])
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    /// Whether the id names a player row rather than a tier container.
    pub fn is_player(&self, id: &str) -> bool {
        self.players.contains_key(id)
    }

    /// Every tier member in tier order, then intra-tier order.
    pub fn ordered_player_ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.tiers.iter().flat_map(|t| t.player_ids.iter())
    }

    /// Players present in `players` but listed by no tier.
    pub fn orphaned_players(&self) -> Vec<&PlayerId> {
        let listed: HashSet<&str> = self.ordered_player_ids().map(String::as_str).collect();
        self.players
            .keys()
            .filter(|id| !listed.contains(id.as_str()))
            .collect()
    }

    /// Whether the membership invariants hold: at least one tier, every
    /// listed id is a known player and no id is listed twice.
    pub fn is_consistent(&self) -> bool {
        if self.tiers.is_empty() {
            return false;
        }
        let mut seen = HashSet::new();
        self.ordered_player_ids()
            .all(|id| self.players.contains_key(id) && seen.insert(id.as_str()))
    }

    /// Serialize the board to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize the board to single-line JSON.
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a board from JSON without schema checks.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_has_one_tier() {
        let board = Board::new();
        assert_eq!(board.version, BOARD_VERSION);
        assert_eq!(board.tiers.len(), 1);
        assert_eq!(board.tiers[0].title, "Tier 1");
        assert!(board.is_consistent());
    }

    #[test]
    fn test_sample_board() {
        let board = Board::sample();
        assert_eq!(board.tiers.len(), 2);
        assert_eq!(board.tiers[0].player_ids.len(), 4);
        assert!(board.tiers[1].player_ids.is_empty());
        assert_eq!(board.tiers[1].title, "Tier 2");
        assert_eq!(board.year_label, "2026 Rookie Class");
        assert!(board.is_consistent());
        assert!(board.orphaned_players().is_empty());
    }

    #[test]
    fn test_new_player_defaults() {
        let player = Player::new();
        assert!(player.name.is_empty());
        assert_eq!(player.pos, Position::Wr);
        assert!(player.tags.is_empty());
        assert_eq!(player.pos_meta.get(PosMetaKey::Zap), Some(""));
        assert_eq!(player.pos_meta.get(PosMetaKey::Category), Some(""));
        assert_eq!(player.pos_meta.get(PosMetaKey::Rp), Some(""));
        assert_eq!(player.display_name(), "Unnamed");
    }

    #[test]
    fn test_position_wire_format() {
        assert_eq!(serde_json::to_string(&Position::Qb).unwrap(), "\"QB\"");
        let pos: Position = serde_json::from_str("\"TE\"").unwrap();
        assert_eq!(pos, Position::Te);

        let other: Position = serde_json::from_str("\"K\"").unwrap();
        assert_eq!(other, Position::Other("K".to_string()));
        assert!(!other.is_supported());
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"K\"");
    }

    #[test]
    fn test_camel_case_keys() {
        let board = Board::sample();
        let value: serde_json::Value = serde_json::from_str(&board.to_json().unwrap()).unwrap();
        assert!(value.get("boardId").is_some());
        assert!(value.get("yearLabel").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value["tiers"][0].get("playerIds").is_some());

        let first = &board.tiers[0].player_ids[0];
        let meta = &value["players"][first.as_str()]["posMeta"];
        assert_eq!(meta["ZAP"], "");
        assert_eq!(meta["Category"], "");
        assert_eq!(meta["RP"], "");
    }

    #[test]
    fn test_pos_meta_with_preserves_other_fields() {
        let meta = PosMeta::blank().with(PosMetaKey::Zap, "88");
        let meta = meta.with(PosMetaKey::Rp, "2.1");
        assert_eq!(meta.get(PosMetaKey::Zap), Some("88"));
        assert_eq!(meta.get(PosMetaKey::Rp), Some("2.1"));
        assert_eq!(meta.get(PosMetaKey::Category), Some(""));
    }

    #[test]
    fn test_lenient_version() {
        let json = r#"{"version":1.0,"tiers":[],"players":{}}"#;
        assert_eq!(Board::from_json(json).unwrap().version, BOARD_VERSION);

        let json = r#"{"version":1.5,"tiers":[],"players":{}}"#;
        assert!(Board::from_json(json).is_err());
    }

    #[test]
    fn test_lenient_timestamp() {
        let json = r#"{"version":1,"updatedAt":1700000000000.0,"tiers":[],"players":{}}"#;
        let board = Board::from_json(json).unwrap();
        assert_eq!(board.updated_at, 1_700_000_000_000);

        let json = r#"{"version":1,"tiers":[],"players":{}}"#;
        assert_eq!(Board::from_json(json).unwrap().updated_at, 0);
    }

    #[test]
    fn test_consistency_detects_duplicates_and_dangling_ids() {
        let mut board = Board::sample();
        let dup = board.tiers[0].player_ids[0].clone();
        board.tiers[1].player_ids.push(dup);
        assert!(!board.is_consistent());

        let mut board = Board::sample();
        board.tiers[1].player_ids.push("ghost".to_string());
        assert!(!board.is_consistent());
    }

    #[test]
    fn test_orphaned_players() {
        let mut board = Board::sample();
        let orphan = Player::named("Orphan", Position::Te);
        let orphan_id = orphan.id.clone();
        board.players.insert(orphan_id.clone(), orphan);
        assert_eq!(board.orphaned_players(), vec![&orphan_id]);
    }
}
