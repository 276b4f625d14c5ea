//! The game the script engine runs against.
//!
//! The engine never owns game state. It reads and writes it through
//! [`GameHost`], which a game (or [`crate::sim::SimHost`]) implements.

use std::ops::Range;

use keeper_types::limits::{
    CREATURE_MAX_LEVEL, CREATURE_TYPES_COUNT, DOOR_TYPES_COUNT, DUNGEONS_COUNT,
    KEEPER_POWERS_COUNT, PLAYERS_COUNT, ROOM_TYPES_COUNT, SCRIPT_FLAGS_COUNT, TRAP_TYPES_COUNT,
    TURN_TIMERS_COUNT,
};
use keeper_types::player::HERO_PLAYER;
use keeper_types::{
    HeadFor, HeroObjective, KillCriteria, MapLocation, NewCreatureSlot, ResearchKind, SubtilePos,
    Tendency,
};
use serde::Serialize;

use crate::names::NameTables;

/// Handle of a creature created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CreatureId(pub u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TurnTimer {
    pub running: bool,
    /// Game turn the timer was started on.
    pub started: u64,
}

/// The part of a keeper's dungeon that scripts can read or change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dungeon {
    pub total_money_owned: i64,
    pub offmap_money_owned: i64,
    pub last_break_in: i64,
    pub num_active_diggers: i64,
    pub num_active_creatures: i64,
    /// Creatures which don't count towards `TOTAL_CREATURES`.
    pub creatures_not_counted: i64,
    /// Research points, scaled by 256.
    pub research_progress: i64,
    pub total_doors: i64,
    pub total_area: i64,
    pub total_creatures_left: i64,
    pub creatures_annoyed: i64,
    pub battles_lost: i64,
    pub battles_won: i64,
    pub rooms_destroyed: i64,
    pub spells_stolen: i64,
    pub times_broken_into: i64,
    pub gold_pots_stolen: i64,
    pub heart_destroyed: bool,
    pub gold_mined: i64,
    pub doors_destroyed: i64,
    pub creatures_scavenged_lost: i64,
    pub creatures_scavenged_gained: i64,
    pub turn_timers: [TurnTimer; TURN_TIMERS_COUNT],
    pub script_flags: [i64; SCRIPT_FLAGS_COUNT],
    pub magic_level: [i64; KEEPER_POWERS_COUNT],
    pub trap_buildable: [i64; TRAP_TYPES_COUNT],
    pub trap_amount: [i64; TRAP_TYPES_COUNT],
    pub trap_placeable: [i64; TRAP_TYPES_COUNT],
    pub door_buildable: [i64; DOOR_TYPES_COUNT],
    pub door_amount: [i64; DOOR_TYPES_COUNT],
    pub door_placeable: [i64; DOOR_TYPES_COUNT],
    pub room_buildable: [i64; ROOM_TYPES_COUNT],
    pub hates_player: [i64; DUNGEONS_COUNT],
    pub allied: [bool; PLAYERS_COUNT],
    pub max_creatures: i64,
    /// Highest experience level per creature kind, zero based.
    pub creature_max_level: [i64; CREATURE_TYPES_COUNT],
}

impl Default for Dungeon {
    fn default() -> Self {
        Self {
            total_money_owned: 0,
            offmap_money_owned: 0,
            last_break_in: 0,
            num_active_diggers: 0,
            num_active_creatures: 0,
            creatures_not_counted: 0,
            research_progress: 0,
            total_doors: 0,
            total_area: 0,
            total_creatures_left: 0,
            creatures_annoyed: 0,
            battles_lost: 0,
            battles_won: 0,
            rooms_destroyed: 0,
            spells_stolen: 0,
            times_broken_into: 0,
            gold_pots_stolen: 0,
            heart_destroyed: false,
            gold_mined: 0,
            doors_destroyed: 0,
            creatures_scavenged_lost: 0,
            creatures_scavenged_gained: 0,
            turn_timers: [TurnTimer::default(); TURN_TIMERS_COUNT],
            script_flags: [0; SCRIPT_FLAGS_COUNT],
            magic_level: [0; KEEPER_POWERS_COUNT],
            trap_buildable: [0; TRAP_TYPES_COUNT],
            trap_amount: [0; TRAP_TYPES_COUNT],
            trap_placeable: [0; TRAP_TYPES_COUNT],
            door_buildable: [0; DOOR_TYPES_COUNT],
            door_amount: [0; DOOR_TYPES_COUNT],
            door_placeable: [0; DOOR_TYPES_COUNT],
            room_buildable: [0; ROOM_TYPES_COUNT],
            hates_player: [0; DUNGEONS_COUNT],
            allied: [false; PLAYERS_COUNT],
            max_creatures: 0,
            creature_max_level: [CREATURE_MAX_LEVEL; CREATURE_TYPES_COUNT],
        }
    }
}

impl Dungeon {
    pub fn add_money(&mut self, amount: i64) {
        self.offmap_money_owned = self.offmap_money_owned.saturating_add(amount);
        self.total_money_owned = self.total_money_owned.saturating_add(amount);
    }

    /// Stop all turn timers and clear all script flags.
    pub fn reset_timers_and_flags(&mut self) {
        self.turn_timers = [TurnTimer::default(); TURN_TIMERS_COUNT];
        self.script_flags = [0; SCRIPT_FLAGS_COUNT];
    }
}

/// Game-wide settings scripts can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRules {
    /// Turns between creature arrivals at portals.
    pub generate_speed: u16,
    pub bonus_time: i64,
    pub countdown_visible: bool,
    pub dead_back_to_pool: bool,
    pub music_track: i64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            generate_speed: 500,
            bonus_time: 0,
            countdown_visible: false,
            dead_back_to_pool: true,
            music_track: 0,
        }
    }
}

/// Per-kind creature statistics shared by all players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CreatureStats {
    pub health: i16,
    pub strength: u8,
    pub armour: u8,
    pub fear: u8,
}

/// Everything the script engine needs from the running game.
pub trait GameHost {
    fn game_turn(&self) -> u64;

    fn hero_player(&self) -> u8 {
        HERO_PLAYER
    }

    /// The player this machine is playing as.
    fn my_player(&self) -> u8;

    fn network_active(&self) -> bool;

    /// Whether the local player has already won or lost.
    fn victory_decided(&self) -> bool;

    fn names(&self) -> &NameTables;

    fn dungeon(&self, player: u8) -> &Dungeon;

    fn dungeon_mut(&mut self, player: u8) -> &mut Dungeon;

    fn rules_mut(&mut self) -> &mut GameRules;

    fn creature_stats_mut(&mut self, kind: u32) -> &mut CreatureStats;

    fn count_creatures_of_kind(&self, player: u8, kind: u32) -> i64;

    fn special_digger_kind(&self, player: u8) -> u32;

    fn room_slabs(&self, player: u8, room: u32) -> i64;

    fn doors_of_kind(&self, player: u8, door: u32) -> i64;

    fn all_dungeons_destroyed(&self, player: u8) -> bool;

    // Map

    fn action_point_exists(&self, number: u32) -> bool;

    fn hero_gate_exists(&self, number: u32) -> bool;

    /// Bit `n` is set when player `n` has entered the action point.
    fn action_point_activations(&self, number: u32) -> u32;

    fn reset_action_point(&mut self, number: u32);

    fn location_coords(&self, location: MapLocation) -> Option<(i64, i64)>;

    fn reveal_map_area(&mut self, player: u8, x: Range<i64>, y: Range<i64>);

    // Availability and research

    fn set_room_available(&mut self, player: u8, room: u32, can_research: i64, can_build: i64);

    fn set_creature_available(&mut self, player: u8, kind: u32, can_attract: i64, amount: i64)
    -> bool;

    fn set_power_available(&mut self, player: u8, power: u32, can_research: i64, can_use: i64)
    -> bool;

    fn research_count(&self, player: u8) -> usize;

    /// Whether the research list has already been replaced this level.
    fn research_overridden(&self, player: u8) -> bool;

    fn remove_all_research(&mut self, player: u8);

    fn add_research(&mut self, player: u8, kind: ResearchKind, item: u32, amount: i64);

    fn update_or_add_research(&mut self, player: u8, kind: ResearchKind, item: u32, amount: i64);

    fn add_creature_to_pool(&mut self, kind: u32, amount: i64);

    fn set_creature_tendency(&mut self, player: u8, tendency: Tendency, value: i64);

    /// Returns how many creatures were killed.
    fn kill_creatures(&mut self, player: u8, kind: u32, criteria: KillCriteria, count: i64) -> i64;

    // Creatures and groups

    fn create_creature(&mut self, player: u8, kind: u32, location: MapLocation) -> Option<CreatureId>;

    fn init_creature(&mut self, creature: CreatureId, gold: i64, level: u8);

    fn creature_level(&self, creature: CreatureId) -> u8;

    fn highest_level_in_group(&self, creature: CreatureId) -> u8;

    /// Put `creature` into the group `member` belongs to.
    fn add_to_group(&mut self, creature: CreatureId, member: CreatureId);

    /// Put `creature` into the group of `member` and make it the leader.
    fn add_to_group_as_leader(&mut self, creature: CreatureId, member: CreatureId);

    fn set_party_objective(&mut self, creature: CreatureId, objective: HeroObjective, countdown_until: u64);

    fn send_tunneller(&mut self, creature: CreatureId, head_for: HeadFor, target: i64) -> bool;

    // Level setup

    fn setup_computer_player(&mut self, player: u8, model: i64);

    fn set_computer_globals(&mut self, player: u8, values: [i64; 6]);

    /// Returns how many checks matched `name`.
    fn set_computer_check(&mut self, player: u8, name: &str, values: [i64; 5]) -> usize;

    fn set_computer_event(&mut self, player: u8, name: &str, values: [i64; 2]) -> usize;

    fn set_computer_process(&mut self, player: u8, name: &str, values: [i64; 5]) -> usize;

    fn swap_creature(&mut self, slot: NewCreatureSlot, kind: u32) -> bool;

    // Interface

    fn set_general_objective(&mut self, message: i64, location: MapLocation, pos: SubtilePos);

    fn set_general_information(&mut self, message: i64, location: MapLocation, pos: SubtilePos);

    fn show_quick_objective(&mut self, text: &str, location: MapLocation, pos: SubtilePos);

    fn show_quick_information(&mut self, index: usize, text: &str, location: MapLocation, pos: SubtilePos);

    fn output_message(&mut self, message: i64);

    fn play_sample(&mut self, sample: i64);

    fn flash_button(&mut self, button: i64, duration: i64);

    // Outcome

    fn set_player_won(&mut self, player: u8);

    fn set_player_lost(&mut self, player: u8);
}
