use serde::Serialize;
use std::ops::Range;
use std::str::FromStr;

use crate::limits::PLAYERS_COUNT;

/// Player slot of the heroes.
pub const HERO_PLAYER: u8 = 4;
/// Numeric value of the `ALL_PLAYERS` selector.
pub const ALL_PLAYERS: u8 = 8;

/// Which players a command or condition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerSelector {
    One(u8),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid player name '{0}'")]
pub struct UnknownPlayer(pub String);

impl PlayerSelector {
    /// Decode a numeric player id as used by `SET_HATE`.
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            id if id == ALL_PLAYERS as i64 => Some(Self::All),
            id if (0..PLAYERS_COUNT as i64).contains(&id) => Some(Self::One(id as u8)),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Self::One(p) => p,
            Self::All => ALL_PLAYERS,
        }
    }

    /// Players covered by this selector. `All` expands to `0..all_end`;
    /// a single player out of range yields an empty range.
    pub fn range(self, all_end: u8) -> Range<u8> {
        let cap = PLAYERS_COUNT as u8;
        match self {
            Self::All => 0..all_end.min(cap),
            Self::One(p) => p.min(cap)..p.saturating_add(1).min(cap),
        }
    }

    pub fn includes(self, player: u8) -> bool {
        match self {
            Self::All => true,
            Self::One(p) => p == player,
        }
    }

    pub fn is_all(self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for PlayerSelector {
    type Err = UnknownPlayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        match upper.as_str() {
            "PLAYER0" => Ok(Self::One(0)),
            "PLAYER1" => Ok(Self::One(1)),
            "PLAYER2" => Ok(Self::One(2)),
            "PLAYER3" => Ok(Self::One(3)),
            "PLAYER_GOOD" => Ok(Self::One(HERO_PLAYER)),
            "ALL_PLAYERS" => Ok(Self::All),
            _ => Err(UnknownPlayer(s.to_string())),
        }
    }
}
