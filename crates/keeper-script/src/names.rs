//! Name tables used to resolve script words to game ids.
//!
//! Creature, room, door, trap and power names normally come from the game's
//! configuration files. [`NameTables::default`] carries the stock Dungeon
//! Keeper set so scripts can be checked without them.

use keeper_types::ResearchKind;
use keeper_types::limits::{SCRIPT_FLAGS_COUNT, TURN_TIMERS_COUNT};
use serde::{Deserialize, Serialize};

/// Case-insensitive mapping between names and numeric ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTable {
    entries: Vec<(String, u32)>,
}

impl NameTable {
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (S, u32)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, id)| (name.into(), id))
                .collect(),
        }
    }

    /// Table whose ids are positions in `names`, starting at 1.
    pub fn numbered(names: &[&str]) -> Self {
        Self::new(names.iter().zip(1u32..).map(|(&name, id)| (name, id)))
    }

    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, id)| id)
    }

    pub fn name_of(&self, id: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|&&(_, i)| i == id)
            .map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const CREATURE_NAMES: &[&str] = &[
    "WIZARD",
    "BARBARIAN",
    "ARCHER",
    "MONK",
    "DWARFA",
    "KNIGHT",
    "AVATAR",
    "TUNNELLER",
    "WITCH",
    "GIANT",
    "FAIRY",
    "THIEF",
    "SAMURAI",
    "HORNY",
    "SKELETON",
    "TROLL",
    "DRAGON",
    "DEMONSPAWN",
    "FLY",
    "DARK_MISTRESS",
    "SORCEROR",
    "BILE_DEMON",
    "IMP",
    "BUG",
    "VAMPIRE",
    "SPIDER",
    "HELL_HOUND",
    "GHOST",
    "TENTACLE",
    "ORC",
    "FLOATING_SPIRIT",
];

const ROOM_NAMES: &[&str] = &[
    "ENTRANCE",
    "TREASURE",
    "RESEARCH",
    "PRISON",
    "TORTURE",
    "TRAINING",
    "DUNGEON_HEART",
    "WORKSHOP",
    "SCAVENGER",
    "TEMPLE",
    "GRAVEYARD",
    "BARRACKS",
    "GARDEN",
    "LAIR",
    "BRIDGE",
    "GUARD_POST",
];

const DOOR_NAMES: &[&str] = &["WOOD", "BRACED", "STEEL", "MAGIC"];

const TRAP_NAMES: &[&str] = &[
    "BOULDER",
    "ALARM",
    "POISON_GAS",
    "LIGHTNING",
    "WORD_OF_POWER",
    "LAVA",
];

const POWER_NAMES: &[&str] = &[
    "POWER_HAND",
    "POWER_IMP",
    "POWER_OBEY",
    "POWER_SLAP",
    "POWER_SIGHT",
    "POWER_CALL_TO_ARMS",
    "POWER_CAVE_IN",
    "POWER_HEAL_CREATURE",
    "POWER_HOLD_AUDIENCE",
    "POWER_LIGHTNING",
    "POWER_SPEED",
    "POWER_PROTECT",
    "POWER_CONCEAL",
    "POWER_DISEASE",
    "POWER_CHICKEN",
    "POWER_DESTROY_WALLS",
    "POWER_TIME_BOMB",
    "POWER_POSSESS",
    "POWER_ARMAGEDDON",
];

/// All configurable name tables a script refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTables {
    pub creatures: NameTable,
    pub rooms: NameTable,
    pub doors: NameTable,
    pub traps: NameTable,
    pub powers: NameTable,
}

impl Default for NameTables {
    fn default() -> Self {
        Self {
            creatures: NameTable::numbered(CREATURE_NAMES),
            rooms: NameTable::numbered(ROOM_NAMES),
            doors: NameTable::numbered(DOOR_NAMES),
            traps: NameTable::numbered(TRAP_NAMES),
            powers: NameTable::numbered(POWER_NAMES),
        }
    }
}

impl NameTables {
    /// Resolve a research item name in the table its kind selects.
    pub fn research_item(&self, kind: ResearchKind, name: &str) -> Option<u32> {
        match kind {
            ResearchKind::Magic => self.powers.id_of(name),
            ResearchKind::Room => self.rooms.id_of(name),
            ResearchKind::Creature => self.creatures.id_of(name),
        }
    }
}

fn numbered_slot(name: &str, prefix: &str, count: usize) -> Option<u8> {
    let upper = name.to_ascii_uppercase();
    let digits = upper.strip_prefix(prefix)?;
    if digits.len() != 1 {
        return None;
    }
    let slot: usize = digits.parse().ok()?;
    (slot < count).then_some(slot as u8)
}

/// `TIMER0` to `TIMER7`.
pub fn timer_index(name: &str) -> Option<u8> {
    numbered_slot(name, "TIMER", TURN_TIMERS_COUNT)
}

/// `FLAG0` to `FLAG7`.
pub fn flag_index(name: &str) -> Option<u8> {
    numbered_slot(name, "FLAG", SCRIPT_FLAGS_COUNT)
}
