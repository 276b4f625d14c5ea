//! A small in-memory game for running scripts without the real engine.
//!
//! [`SimHost`] keeps just enough state for every script command to have a
//! visible effect: dungeons, creatures and their groups, action points,
//! research lists, computer players and the messages shown to the player.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::ops::Range;

use keeper_types::limits::{
    CREATURE_TYPES_COUNT, KEEPER_POWERS_COUNT, PLAYERS_COUNT, ROOM_TYPES_COUNT,
};
use keeper_types::player::HERO_PLAYER;
use keeper_types::{
    HeadFor, HeroObjective, KillCriteria, MapLocation, NewCreatureSlot, ResearchKind, SubtilePos,
    Tendency,
};

use crate::host::{CreatureId, CreatureStats, Dungeon, GameHost, GameRules};
use crate::names::NameTables;
use crate::trigger::{IMP_KIND, TUNNELLER_KIND};

const DEFAULT_CHECKS: &[&str] = &[
    "CHECK MONEY",
    "CHECK EXPAND ROOM",
    "CHECK AVAILIABLE TRAP",
    "CHECK AVAILIABLE DOOR",
    "CHECK FOR NEUTRAL PLACES",
    "CHECK FOR ENEMY ENTRANCES",
    "CHECK FOR SLAP IMP",
    "CHECK FOR SPEED UP",
    "CHECK FOR QUICK ATTACK",
    "CHECK TO PRETTY",
];

const DEFAULT_EVENTS: &[&str] = &[
    "EVENT DUNGEON BREACH",
    "EVENT ROOM ATTACK",
    "EVENT HEART UNDER ATTACK",
    "EVENT TREASURE ROOM FULL",
    "EVENT LIVING SPACE FULL",
    "EVENT FIGHT",
    "EVENT FIGHT TEST",
    "EVENT MAGIC FOE",
    "EVENT CHECK ROOMS FULL",
    "EVENT PAY DAY",
];

const DEFAULT_PROCESSES: &[&str] = &[
    "BUILD ALL ROOM 3x3",
    "BUILD ALL ROOM 4x4",
    "BUILD A PRISON ROOM",
    "BUILD A TORTURE ROOM",
    "BUILD A SCAVENGER ROOM",
    "BUILD A TEMPLE ROOM",
    "BUILD A GRAVEYARD ROOM",
    "BUILD A BARRACK ROOM",
    "BUILD A TREASURE ROOM",
    "BUILD A RESEARCH ROOM",
    "BUILD A HATCHERY",
    "BUILD A LAIR ROOM",
    "BUILD A TRAINING ROOM",
    "BUILD A WORKSHOP ROOM",
    "DIG TO ENTRANCE",
    "DIG TO GOLD",
    "BUILD A BRIDGE",
    "ATTACK PLAN 1",
    "ATTACK SAFE ATTACK",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimCreature {
    pub kind: u32,
    pub player: u8,
    pub location: MapLocation,
    pub gold: i64,
    pub level: u8,
    pub alive: bool,
    pub objective: Option<(HeroObjective, u64)>,
    pub heading: Option<(HeadFor, i64)>,
    pub group: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SimGroup {
    leader: CreatureId,
    members: Vec<CreatureId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SimActionPoint {
    coords: (i64, i64),
    activations: u32,
}

/// What the local player would have seen or heard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimMessage {
    Objective { message: i64, location: MapLocation },
    Information { message: i64, location: MapLocation },
    QuickObjective { text: String, location: MapLocation },
    QuickInformation { index: usize, text: String, location: MapLocation },
    Speech(i64),
    Sound(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimResearch {
    pub kind: ResearchKind,
    pub item: u32,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimComputer {
    pub model: i64,
    pub globals: [i64; 6],
    pub checks: Vec<(String, [i64; 5])>,
    pub events: Vec<(String, [i64; 2])>,
    pub processes: Vec<(String, [i64; 5])>,
}

impl SimComputer {
    fn new(model: i64) -> Self {
        Self {
            model,
            globals: [0; 6],
            checks: DEFAULT_CHECKS.iter().map(|n| (n.to_string(), [0; 5])).collect(),
            events: DEFAULT_EVENTS.iter().map(|n| (n.to_string(), [0; 2])).collect(),
            processes: DEFAULT_PROCESSES.iter().map(|n| (n.to_string(), [0; 5])).collect(),
        }
    }
}

fn set_matching<const N: usize>(entries: &mut [(String, [i64; N])], name: &str, values: [i64; N]) -> usize {
    let mut count = 0;
    for (entry, slot) in entries.iter_mut() {
        if entry.eq_ignore_ascii_case(name) {
            *slot = values;
            count += 1;
        }
    }
    count
}

#[derive(Debug, Clone)]
pub struct SimHost {
    pub turn: u64,
    pub my_player: u8,
    pub network_active: bool,
    pub names: NameTables,
    pub dungeons: Vec<Dungeon>,
    pub rules: GameRules,
    pub creature_stats: Vec<CreatureStats>,
    pub creatures: Vec<SimCreature>,
    groups: Vec<SimGroup>,
    action_points: BTreeMap<u32, SimActionPoint>,
    hero_gates: BTreeMap<u32, (i64, i64)>,
    pub hearts: Vec<(i64, i64)>,
    pub room_slabs: BTreeMap<(u8, u32), i64>,
    pub doors: BTreeMap<(u8, u32), i64>,
    pub rooms_available: BTreeMap<(u8, u32), (i64, i64)>,
    pub creatures_available: BTreeMap<(u8, u32), (i64, i64)>,
    pub powers_available: BTreeMap<(u8, u32), (i64, i64)>,
    pub research: Vec<Vec<SimResearch>>,
    research_overridden: Vec<bool>,
    pub pool: Vec<i64>,
    pub tendencies: Vec<[i64; 2]>,
    pub computers: Vec<Option<SimComputer>>,
    pub swaps: Vec<(NewCreatureSlot, u32)>,
    pub flashing: (i64, i64),
    pub messages: Vec<SimMessage>,
    pub revealed: Vec<(u8, Range<i64>, Range<i64>)>,
    pub won: Vec<u8>,
    pub lost: Vec<u8>,
    /// Gold every keeper earns per turn in [`SimHost::advance`].
    pub income_per_turn: i64,
    scheduled: Vec<(u64, u32, u8)>,
    dungeon_reads: Cell<u64>,
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHost {
    pub fn new() -> Self {
        Self {
            turn: 0,
            my_player: 0,
            network_active: false,
            names: NameTables::default(),
            dungeons: vec![Dungeon::default(); PLAYERS_COUNT],
            rules: GameRules::default(),
            creature_stats: vec![CreatureStats::default(); CREATURE_TYPES_COUNT],
            creatures: Vec::new(),
            groups: Vec::new(),
            action_points: BTreeMap::new(),
            hero_gates: BTreeMap::new(),
            hearts: (0..PLAYERS_COUNT as i64).map(|p| (20 + 40 * p, 20 + 40 * p)).collect(),
            room_slabs: BTreeMap::new(),
            doors: BTreeMap::new(),
            rooms_available: BTreeMap::new(),
            creatures_available: BTreeMap::new(),
            powers_available: BTreeMap::new(),
            research: vec![Vec::new(); PLAYERS_COUNT],
            research_overridden: vec![false; PLAYERS_COUNT],
            pool: vec![0; CREATURE_TYPES_COUNT],
            tendencies: vec![[0; 2]; PLAYERS_COUNT],
            computers: vec![None; PLAYERS_COUNT],
            swaps: Vec::new(),
            flashing: (0, 0),
            messages: Vec::new(),
            revealed: Vec::new(),
            won: Vec::new(),
            lost: Vec::new(),
            income_per_turn: 0,
            scheduled: Vec::new(),
            dungeon_reads: Cell::new(0),
        }
    }

    /// How often a keeper's dungeon has been read through [`GameHost::dungeon`].
    pub fn dungeon_reads(&self) -> u64 {
        self.dungeon_reads.get()
    }

    pub fn add_action_point(&mut self, number: u32, coords: (i64, i64)) {
        self.action_points.insert(
            number,
            SimActionPoint {
                coords,
                activations: 0,
            },
        );
    }

    pub fn add_hero_gate(&mut self, number: u32, coords: (i64, i64)) {
        self.hero_gates.insert(number, coords);
    }

    /// Mark `player` as having entered action point `number`.
    pub fn activate_action_point(&mut self, number: u32, player: u8) {
        match self.action_points.get_mut(&number) {
            Some(point) => point.activations |= 1u32.checked_shl(u32::from(player)).unwrap_or(0),
            None => log::warn!("No action point {number} to activate"),
        }
    }

    /// Activate action point `number` for `player` once `turn` is reached.
    pub fn schedule_activation(&mut self, turn: u64, number: u32, player: u8) {
        self.scheduled.push((turn, number, player));
    }

    /// Move the game on by one turn.
    pub fn advance(&mut self) {
        self.turn += 1;
        if self.income_per_turn != 0 {
            for dungeon in &mut self.dungeons[..usize::from(HERO_PLAYER)] {
                dungeon.add_money(self.income_per_turn);
            }
        }
        let turn = self.turn;
        let due: Vec<_> = self
            .scheduled
            .iter()
            .filter(|(t, ..)| *t == turn)
            .map(|&(_, number, player)| (number, player))
            .collect();
        for (number, player) in due {
            log::debug!("Turn {turn}: player {player} enters action point {number}");
            self.activate_action_point(number, player);
        }
    }

    pub fn group_leader(&self, creature: CreatureId) -> Option<CreatureId> {
        let group = self.creatures.get(creature.0 as usize)?.group?;
        Some(self.groups[group].leader)
    }

    fn creature(&self, id: CreatureId) -> Option<&SimCreature> {
        self.creatures.get(id.0 as usize)
    }

    fn creature_mut(&mut self, id: CreatureId) -> Option<&mut SimCreature> {
        self.creatures.get_mut(id.0 as usize)
    }

    fn alive(&self, player: u8) -> impl Iterator<Item = &SimCreature> {
        self.creatures
            .iter()
            .filter(move |c| c.alive && c.player == player)
    }

    /// Group of `member`, created with it as leader when it has none yet.
    fn group_of(&mut self, member: CreatureId) -> Option<usize> {
        let existing = self.creature(member)?.group;
        if existing.is_some() {
            return existing;
        }
        let group = self.groups.len();
        self.groups.push(SimGroup {
            leader: member,
            members: vec![member],
        });
        self.creature_mut(member)?.group = Some(group);
        Some(group)
    }

    fn join_group(&mut self, creature: CreatureId, member: CreatureId) -> Option<usize> {
        let group = self.group_of(member)?;
        let previous = self.creature(creature)?.group;
        if previous == Some(group) {
            return Some(group);
        }
        if let Some(old) = previous {
            self.groups[old].members.retain(|&c| c != creature);
        }
        self.groups[group].members.push(creature);
        self.creature_mut(creature)?.group = Some(group);
        Some(group)
    }

    fn spawn_allowed(&self, location: MapLocation) -> bool {
        match location {
            MapLocation::ActionPoint(n) => self.action_points.contains_key(&n),
            MapLocation::HeroGate(n) => self.hero_gates.contains_key(&n),
            MapLocation::PlayersHeart(p) => self
                .dungeons
                .get(usize::from(p))
                .is_some_and(|d| !d.heart_destroyed),
            _ => false,
        }
    }
}

impl GameHost for SimHost {
    fn game_turn(&self) -> u64 {
        self.turn
    }

    fn my_player(&self) -> u8 {
        self.my_player
    }

    fn network_active(&self) -> bool {
        self.network_active
    }

    fn victory_decided(&self) -> bool {
        self.won.contains(&self.my_player) || self.lost.contains(&self.my_player)
    }

    fn names(&self) -> &NameTables {
        &self.names
    }

    fn dungeon(&self, player: u8) -> &Dungeon {
        self.dungeon_reads.set(self.dungeon_reads.get() + 1);
        &self.dungeons[usize::from(player)]
    }

    fn dungeon_mut(&mut self, player: u8) -> &mut Dungeon {
        &mut self.dungeons[usize::from(player)]
    }

    fn rules_mut(&mut self) -> &mut GameRules {
        &mut self.rules
    }

    fn creature_stats_mut(&mut self, kind: u32) -> &mut CreatureStats {
        &mut self.creature_stats[kind as usize % CREATURE_TYPES_COUNT]
    }

    fn count_creatures_of_kind(&self, player: u8, kind: u32) -> i64 {
        self.alive(player).filter(|c| c.kind == kind).count() as i64
    }

    fn special_digger_kind(&self, player: u8) -> u32 {
        if player == HERO_PLAYER {
            TUNNELLER_KIND
        } else {
            IMP_KIND
        }
    }

    fn room_slabs(&self, player: u8, room: u32) -> i64 {
        self.room_slabs.get(&(player, room)).copied().unwrap_or(0)
    }

    fn doors_of_kind(&self, player: u8, door: u32) -> i64 {
        self.doors.get(&(player, door)).copied().unwrap_or(0)
    }

    fn all_dungeons_destroyed(&self, player: u8) -> bool {
        self.dungeons[..usize::from(HERO_PLAYER)]
            .iter()
            .enumerate()
            .filter(|(p, _)| *p != usize::from(player))
            .all(|(_, d)| d.heart_destroyed)
    }

    fn action_point_exists(&self, number: u32) -> bool {
        self.action_points.contains_key(&number)
    }

    fn hero_gate_exists(&self, number: u32) -> bool {
        self.hero_gates.contains_key(&number)
    }

    fn action_point_activations(&self, number: u32) -> u32 {
        self.action_points.get(&number).map_or(0, |p| p.activations)
    }

    fn reset_action_point(&mut self, number: u32) {
        if let Some(point) = self.action_points.get_mut(&number) {
            point.activations = 0;
        }
    }

    fn location_coords(&self, location: MapLocation) -> Option<(i64, i64)> {
        match location {
            MapLocation::ActionPoint(n) => self.action_points.get(&n).map(|p| p.coords),
            MapLocation::HeroGate(n) => self.hero_gates.get(&n).copied(),
            MapLocation::PlayersHeart(p) => self.hearts.get(usize::from(p)).copied(),
            _ => None,
        }
    }

    fn reveal_map_area(&mut self, player: u8, x: Range<i64>, y: Range<i64>) {
        self.revealed.push((player, x, y));
    }

    fn set_room_available(&mut self, player: u8, room: u32, can_research: i64, can_build: i64) {
        self.rooms_available
            .insert((player, room), (can_research, can_build));
        self.dungeons[usize::from(player)].room_buildable[room as usize % ROOM_TYPES_COUNT] = can_build;
    }

    fn set_creature_available(&mut self, player: u8, kind: u32, can_attract: i64, amount: i64) -> bool {
        if kind as usize >= CREATURE_TYPES_COUNT {
            return false;
        }
        self.creatures_available
            .insert((player, kind), (can_attract, amount));
        true
    }

    fn set_power_available(&mut self, player: u8, power: u32, can_research: i64, can_use: i64) -> bool {
        if power as usize >= KEEPER_POWERS_COUNT {
            return false;
        }
        self.powers_available
            .insert((player, power), (can_research, can_use));
        self.dungeons[usize::from(player)].magic_level[power as usize] = can_use;
        true
    }

    fn research_count(&self, player: u8) -> usize {
        self.research[usize::from(player)].len()
    }

    fn research_overridden(&self, player: u8) -> bool {
        self.research_overridden[usize::from(player)]
    }

    fn remove_all_research(&mut self, player: u8) {
        self.research[usize::from(player)].clear();
        self.research_overridden[usize::from(player)] = true;
    }

    fn add_research(&mut self, player: u8, kind: ResearchKind, item: u32, amount: i64) {
        self.research[usize::from(player)].push(SimResearch { kind, item, amount });
    }

    fn update_or_add_research(&mut self, player: u8, kind: ResearchKind, item: u32, amount: i64) {
        let list = &mut self.research[usize::from(player)];
        match list.iter_mut().find(|r| r.kind == kind && r.item == item) {
            Some(entry) => entry.amount = amount,
            None => list.push(SimResearch { kind, item, amount }),
        }
    }

    fn add_creature_to_pool(&mut self, kind: u32, amount: i64) {
        let slot = &mut self.pool[kind as usize % CREATURE_TYPES_COUNT];
        *slot = slot.saturating_add(amount);
    }

    fn set_creature_tendency(&mut self, player: u8, tendency: Tendency, value: i64) {
        let slot = match tendency {
            Tendency::Imprison => 0,
            Tendency::Flee => 1,
        };
        self.tendencies[usize::from(player)][slot] = value;
    }

    fn kill_creatures(&mut self, player: u8, kind: u32, criteria: KillCriteria, count: i64) -> i64 {
        let mut victims: Vec<usize> = self
            .creatures
            .iter()
            .enumerate()
            .filter(|(_, c)| c.alive && c.player == player && c.kind == kind)
            .map(|(i, _)| i)
            .collect();
        match criteria {
            KillCriteria::MostExperienced
            | KillCriteria::MostExpWandering
            | KillCriteria::MostExpWorking
            | KillCriteria::MostExpFighting => {
                victims.sort_by_key(|&i| std::cmp::Reverse(self.creatures[i].level));
            }
            KillCriteria::LeastExperienced
            | KillCriteria::LeastExpWandering
            | KillCriteria::LeastExpWorking
            | KillCriteria::LeastExpFighting => {
                victims.sort_by_key(|&i| self.creatures[i].level);
            }
            KillCriteria::Anywhere => {}
        }
        let count = usize::try_from(count).unwrap_or(0);
        let mut killed = 0;
        for i in victims.into_iter().take(count) {
            self.creatures[i].alive = false;
            self.dungeons[usize::from(player)].num_active_creatures -= 1;
            killed += 1;
        }
        killed
    }

    fn create_creature(&mut self, player: u8, kind: u32, location: MapLocation) -> Option<CreatureId> {
        if !self.spawn_allowed(location) {
            return None;
        }
        let id = CreatureId(u32::try_from(self.creatures.len()).ok()?);
        self.creatures.push(SimCreature {
            kind,
            player,
            location,
            gold: 0,
            level: 0,
            alive: true,
            objective: None,
            heading: None,
            group: None,
        });
        self.dungeons[usize::from(player)].num_active_creatures += 1;
        Some(id)
    }

    fn init_creature(&mut self, creature: CreatureId, gold: i64, level: u8) {
        if let Some(c) = self.creature_mut(creature) {
            c.gold = gold;
            c.level = level;
        }
    }

    fn creature_level(&self, creature: CreatureId) -> u8 {
        self.creature(creature).map_or(0, |c| c.level)
    }

    fn highest_level_in_group(&self, creature: CreatureId) -> u8 {
        let Some(c) = self.creature(creature) else {
            return 0;
        };
        match c.group {
            Some(group) => self.groups[group]
                .members
                .iter()
                .map(|&m| self.creature_level(m))
                .max()
                .unwrap_or(c.level),
            None => c.level,
        }
    }

    fn add_to_group(&mut self, creature: CreatureId, member: CreatureId) {
        self.join_group(creature, member);
    }

    fn add_to_group_as_leader(&mut self, creature: CreatureId, member: CreatureId) {
        if let Some(group) = self.join_group(creature, member) {
            self.groups[group].leader = creature;
        }
    }

    fn set_party_objective(&mut self, creature: CreatureId, objective: HeroObjective, countdown_until: u64) {
        if let Some(c) = self.creature_mut(creature) {
            c.objective = Some((objective, countdown_until));
        }
    }

    fn send_tunneller(&mut self, creature: CreatureId, head_for: HeadFor, target: i64) -> bool {
        let reachable = match head_for {
            HeadFor::ActionPoint => u32::try_from(target).is_ok_and(|n| self.action_point_exists(n)),
            HeadFor::Dungeon | HeadFor::DungeonHeart => usize::try_from(target)
                .ok()
                .and_then(|p| self.dungeons.get(p))
                .is_some_and(|d| !d.heart_destroyed),
            HeadFor::AppropriateDungeon => self.dungeons[..usize::from(HERO_PLAYER)]
                .iter()
                .any(|d| !d.heart_destroyed),
        };
        if let Some(c) = self.creature_mut(creature) {
            c.heading = Some((head_for, target));
        }
        reachable
    }

    fn setup_computer_player(&mut self, player: u8, model: i64) {
        self.computers[usize::from(player)] = Some(SimComputer::new(model));
    }

    fn set_computer_globals(&mut self, player: u8, values: [i64; 6]) {
        if let Some(computer) = &mut self.computers[usize::from(player)] {
            computer.globals = values;
        }
    }

    fn set_computer_check(&mut self, player: u8, name: &str, values: [i64; 5]) -> usize {
        self.computers[usize::from(player)]
            .as_mut()
            .map_or(0, |c| set_matching(&mut c.checks, name, values))
    }

    fn set_computer_event(&mut self, player: u8, name: &str, values: [i64; 2]) -> usize {
        self.computers[usize::from(player)]
            .as_mut()
            .map_or(0, |c| set_matching(&mut c.events, name, values))
    }

    fn set_computer_process(&mut self, player: u8, name: &str, values: [i64; 5]) -> usize {
        self.computers[usize::from(player)]
            .as_mut()
            .map_or(0, |c| set_matching(&mut c.processes, name, values))
    }

    fn swap_creature(&mut self, slot: NewCreatureSlot, kind: u32) -> bool {
        if kind as usize >= CREATURE_TYPES_COUNT {
            return false;
        }
        self.swaps.push((slot, kind));
        true
    }

    fn set_general_objective(&mut self, message: i64, location: MapLocation, _pos: SubtilePos) {
        self.messages.push(SimMessage::Objective { message, location });
    }

    fn set_general_information(&mut self, message: i64, location: MapLocation, _pos: SubtilePos) {
        self.messages
            .push(SimMessage::Information { message, location });
    }

    fn show_quick_objective(&mut self, text: &str, location: MapLocation, _pos: SubtilePos) {
        self.messages.push(SimMessage::QuickObjective {
            text: text.to_string(),
            location,
        });
    }

    fn show_quick_information(&mut self, index: usize, text: &str, location: MapLocation, _pos: SubtilePos) {
        self.messages.push(SimMessage::QuickInformation {
            index,
            text: text.to_string(),
            location,
        });
    }

    fn output_message(&mut self, message: i64) {
        self.messages.push(SimMessage::Speech(message));
    }

    fn play_sample(&mut self, sample: i64) {
        self.messages.push(SimMessage::Sound(sample));
    }

    fn flash_button(&mut self, button: i64, duration: i64) {
        self.flashing = (button, duration);
    }

    fn set_player_won(&mut self, player: u8) {
        if !self.won.contains(&player) {
            self.won.push(player);
        }
    }

    fn set_player_lost(&mut self, player: u8) {
        if !self.lost.contains(&player) {
            self.lost.push(player);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawning_needs_a_known_place() {
        let mut host = SimHost::new();
        host.add_action_point(2, (5, 5));
        assert_eq!(
            host.create_creature(0, 14, MapLocation::ActionPoint(2)),
            Some(CreatureId(0))
        );
        assert_eq!(host.create_creature(0, 14, MapLocation::ActionPoint(3)), None);
        assert_eq!(host.create_creature(4, 5, MapLocation::HeroGate(1)), None);
        host.dungeons[1].heart_destroyed = true;
        assert_eq!(host.create_creature(1, 5, MapLocation::PlayersHeart(1)), None);
        assert_eq!(host.dungeons[0].num_active_creatures, 1);
        assert_eq!(host.count_creatures_of_kind(0, 14), 1);
    }

    #[test]
    fn computer_entries_match_by_name() {
        let mut host = SimHost::new();
        assert_eq!(host.set_computer_check(1, "CHECK MONEY", [1; 5]), 0);
        host.setup_computer_player(1, 3);
        assert_eq!(host.set_computer_check(1, "check money", [1; 5]), 1);
        assert_eq!(host.set_computer_event(1, "EVENT PAY DAY", [2; 2]), 1);
        assert_eq!(host.set_computer_process(1, "NO SUCH PROCESS", [0; 5]), 0);
    }

    #[test]
    fn kills_most_experienced_first() {
        let mut host = SimHost::new();
        for level in [1, 5, 3] {
            let id = host
                .create_creature(0, 14, MapLocation::PlayersHeart(0))
                .expect("created");
            host.init_creature(id, 0, level);
        }
        assert_eq!(host.kill_creatures(0, 14, KillCriteria::MostExperienced, 1), 1);
        assert!(!host.creatures[1].alive);
        assert_eq!(host.count_creatures_of_kind(0, 14), 2);
        assert_eq!(host.kill_creatures(0, 14, KillCriteria::Anywhere, 10), 2);
        assert_eq!(host.dungeons[0].num_active_creatures, 0);
    }

    #[test]
    fn advance_pays_keepers_and_fires_schedule() {
        let mut host = SimHost::new();
        host.income_per_turn = 10;
        host.add_action_point(1, (3, 3));
        host.schedule_activation(2, 1, 3);
        host.advance();
        assert_eq!(host.action_point_activations(1), 0);
        host.advance();
        assert_eq!(host.action_point_activations(1), 1 << 3);
        assert_eq!(host.dungeons[0].total_money_owned, 20);
        assert_eq!(host.dungeons[usize::from(HERO_PLAYER)].total_money_owned, 0);
    }

    #[test]
    fn activation_by_out_of_range_player_is_ignored() {
        let mut host = SimHost::new();
        host.add_action_point(1, (3, 3));
        host.activate_action_point(1, 40);
        assert_eq!(host.action_point_activations(1), 0);
        assert!(!crate::condition::action_point_activated_by(&host, 1, 40));
    }
}
