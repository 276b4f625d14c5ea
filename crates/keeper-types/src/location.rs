use serde::Serialize;

/// A place on the map a command refers to, resolved once at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum MapLocation {
    #[default]
    None,
    ActionPoint(u32),
    HeroGate(u32),
    PlayersHeart(u8),
    CreatureKind(u32),
    RoomKind(u32),
}

impl MapLocation {
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether creatures can be created at this location.
    pub fn can_spawn(self) -> bool {
        matches!(self, Self::ActionPoint(_) | Self::HeroGate(_) | Self::PlayersHeart(_))
    }
}

/// Subtile coordinates attached to objective and information texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SubtilePos {
    pub x: u16,
    pub y: u16,
}

impl SubtilePos {
    /// Builds a position from script arguments, clamping out of range values.
    pub fn from_args(x: i64, y: i64) -> Self {
        Self {
            x: x.clamp(0, u16::MAX as i64) as u16,
            y: y.clamp(0, u16::MAX as i64) as u16,
        }
    }

    pub fn is_origin(self) -> bool {
        self.x == 0 && self.y == 0
    }
}
