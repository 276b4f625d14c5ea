use serde::Serialize;
use strum::{EnumCount, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Per-player quantities an `IF` condition can compare.
///
/// Only some variants have a script keyword. The rest are selected
/// indirectly: a creature name in an `IF` reads [`Variable::CreatureNum`],
/// a room name reads [`Variable::RoomSlabs`], and `IF_AVAILABLE` reads the
/// `Available*` variants.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    EnumIter,
    EnumCount,
    EnumString,
    FromRepr,
    IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum Variable {
    Money = 1,
    GameTurn = 5,
    BreakIn = 6,
    #[strum(disabled)]
    CreatureNum = 7,
    TotalImps = 8,
    TotalCreatures = 9,
    TotalResearch = 10,
    TotalDoors = 11,
    TotalArea = 12,
    TotalCreaturesLeft = 13,
    CreaturesAnnoyed = 14,
    BattlesLost = 15,
    BattlesWon = 16,
    RoomsDestroyed = 17,
    SpellsStolen = 18,
    TimesBrokenInto = 19,
    GoldPotsStolen = 20,
    #[strum(disabled)]
    Timer = 21,
    DungeonDestroyed = 22,
    TotalGoldMined = 24,
    #[strum(disabled)]
    Flag = 25,
    #[strum(disabled)]
    RoomSlabs = 26,
    DoorsDestroyed = 27,
    CreaturesScavengedLost = 28,
    CreaturesScavengedGained = 29,
    #[strum(disabled)]
    AvailableMagic = 30,
    #[strum(disabled)]
    AvailableTrap = 31,
    #[strum(disabled)]
    AvailableDoor = 32,
    #[strum(disabled)]
    AvailableRoom = 33,
    AllDungeonsDestroyed = 34,
    #[strum(disabled)]
    DoorNum = 35,
}

impl Variable {
    /// Whether the variable reads an indexed slot (creature kind, timer,
    /// flag, room, door, trap or power) rather than a single value.
    pub fn is_indexed(self) -> bool {
        matches!(
            self,
            Self::CreatureNum
                | Self::Timer
                | Self::Flag
                | Self::RoomSlabs
                | Self::AvailableMagic
                | Self::AvailableTrap
                | Self::AvailableDoor
                | Self::AvailableRoom
                | Self::DoorNum
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn discriminants() {
        assert_eq!(Variable::Money as u8, 1);
        assert_eq!(Variable::GameTurn as u8, 5);
        assert_eq!(Variable::TotalGoldMined as u8, 24);
        assert_eq!(Variable::AllDungeonsDestroyed as u8, 34);
        assert_eq!(Variable::DoorNum as u8, 35);
    }

    #[test]
    fn script_names() {
        assert_eq!(Variable::from_str("MONEY"), Ok(Variable::Money));
        assert_eq!(
            Variable::from_str("creatures_scavenged_gained"),
            Ok(Variable::CreaturesScavengedGained)
        );
        assert_eq!(Variable::from_str("TOTAL_IMPS"), Ok(Variable::TotalImps));
    }

    #[test]
    fn internal_variables_have_no_keyword() {
        for name in ["CREATURE_NUM", "TIMER", "FLAG", "ROOM_SLABS", "DOOR_NUM", "AVAILABLE_ROOM"] {
            assert!(Variable::from_str(name).is_err(), "{name} should not parse");
        }
    }

    #[test]
    fn indexed() {
        assert!(Variable::Timer.is_indexed());
        assert!(Variable::AvailableTrap.is_indexed());
        assert!(!Variable::Money.is_indexed());
    }
}
