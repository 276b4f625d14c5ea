//! Fixed capacities of the level script engine and the game limits it
//! validates script arguments against.

/// Conditions per level, and the maximum nesting depth of condition blocks.
pub const CONDITIONS_COUNT: usize = 48;
pub const PARTY_TRIGGERS_COUNT: usize = 48;
pub const TUNNELLER_TRIGGERS_COUNT: usize = 16;
pub const SCRIPT_VALUES_COUNT: usize = 64;
pub const WIN_CONDITIONS_COUNT: usize = 4;
pub const CREATURE_PARTYS_COUNT: usize = 16;
/// Members per party. Tunneller parties lose one slot to the tunneller.
pub const PARTY_MEMBERS_COUNT: usize = 8;
pub const PARTY_NAME_LEN: usize = 100;
/// Arguments a single script command may take.
pub const COMMANDDESC_ARGS_COUNT: usize = 8;

pub const QUICK_MESSAGES_COUNT: usize = 50;
pub const MESSAGE_TEXT_LEN: usize = 1024;
/// Highest valid index into the game's string table.
pub const STRINGS_MAX: i64 = 941;

pub const CREATURE_MAX_LEVEL: i64 = 10;
/// Upper bound of creatures in one party spawn.
pub const CREATURES_COUNT: i64 = 256;
/// Research list length at which `RESEARCH_ORDER` refuses more items.
pub const RESEARCH_ITEMS_COUNT: usize = 34;
pub const PLAYERS_COUNT: usize = 5;
pub const DUNGEONS_COUNT: usize = 5;
pub const TURN_TIMERS_COUNT: usize = 8;
pub const SCRIPT_FLAGS_COUNT: usize = 8;

pub const CREATURE_TYPES_COUNT: usize = 32;
pub const ROOM_TYPES_COUNT: usize = 17;
pub const TRAP_TYPES_COUNT: usize = 7;
pub const DOOR_TYPES_COUNT: usize = 5;
pub const KEEPER_POWERS_COUNT: usize = 20;
