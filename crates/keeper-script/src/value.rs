//! Game changes made by script `VALUE`s.

use keeper_types::limits::{
    CREATURE_TYPES_COUNT, DOOR_TYPES_COUNT, DUNGEONS_COUNT, PLAYERS_COUNT, SCRIPT_FLAGS_COUNT,
    TRAP_TYPES_COUNT, TURN_TIMERS_COUNT,
};
use keeper_types::{
    KillCriteria, MapLocation, MessageKind, PlayerSelector, ResearchKind, SubtilePos, Tendency,
};
use serde::Serialize;

use crate::host::{GameHost, TurnTimer};
use crate::level::LevelScript;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CreatureStat {
    Health,
    Strength,
    Armour,
    Fear,
}

/// Which list an availability command changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Availability {
    Room,
    Creature,
    Magic,
    Trap,
    Door,
}

/// A change to game state, applied when its gating condition is met or
/// straight away when registered outside of any condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValueOp {
    SetHate {
        player: PlayerSelector,
        enemy: i64,
        hate: i64,
    },
    SetGenerateSpeed(i64),
    /// `ROOM_AVAILABLE`, `CREATURE_AVAILABLE`, `MAGIC_AVAILABLE`,
    /// `TRAP_AVAILABLE` and `DOOR_AVAILABLE`.
    Available {
        player: PlayerSelector,
        what: Availability,
        item: u32,
        first: i64,
        second: i64,
    },
    Research {
        player: PlayerSelector,
        kind: ResearchKind,
        item: u32,
        amount: i64,
    },
    ResearchOrder {
        player: PlayerSelector,
        kind: ResearchKind,
        item: u32,
        amount: i64,
    },
    SetTimer {
        player: PlayerSelector,
        timer: u8,
    },
    SetFlag {
        player: PlayerSelector,
        flag: u8,
        value: i64,
    },
    MaxCreatures {
        player: PlayerSelector,
        count: i64,
    },
    DisplayObjective {
        message: i64,
        location: MapLocation,
        pos: SubtilePos,
    },
    DisplayInformation {
        message: i64,
        location: MapLocation,
        pos: SubtilePos,
    },
    QuickObjective {
        index: usize,
        location: MapLocation,
        pos: SubtilePos,
    },
    QuickInformation {
        index: usize,
        location: MapLocation,
        pos: SubtilePos,
    },
    AddCreatureToPool {
        kind: u32,
        amount: i64,
    },
    ResetActionPoint(u32),
    TutorialFlashButton {
        button: i64,
        duration: i64,
    },
    SetCreatureMaxLevel {
        player: PlayerSelector,
        kind: u32,
        /// Zero based. May be out of range; the script only warns about it.
        level: i64,
    },
    SetCreatureStat {
        kind: u32,
        stat: CreatureStat,
        value: i64,
    },
    AllyPlayers(u8, u8),
    DeadCreaturesReturnToPool(bool),
    BonusLevelTime(i64),
    PlayMessage {
        player: PlayerSelector,
        kind: MessageKind,
        message: i64,
    },
    AddGold {
        player: PlayerSelector,
        amount: i64,
    },
    SetTendency {
        player: PlayerSelector,
        tendency: Tendency,
        value: i64,
    },
    RevealMapRect {
        player: PlayerSelector,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },
    RevealMapLocation {
        player: PlayerSelector,
        location: MapLocation,
        range: i64,
    },
    KillCreature {
        player: PlayerSelector,
        kind: u32,
        criteria: KillCriteria,
        count: i64,
    },
}

fn players(selector: PlayerSelector) -> impl Iterator<Item = u8> {
    selector.range(PLAYERS_COUNT as u8)
}

fn slot(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

/// Whether a message aimed at `selector` is shown on this machine.
fn shown_locally(selector: PlayerSelector, host: &dyn GameHost) -> bool {
    let me = host.my_player();
    (me as usize) < PLAYERS_COUNT && selector.includes(me)
}

fn span(centre: i64, size: i64) -> std::ops::Range<i64> {
    let half = size >> 1;
    centre.saturating_sub(half)..centre.saturating_add(half)
}

impl ValueOp {
    pub fn apply(&self, script: &LevelScript, host: &mut dyn GameHost) {
        match *self {
            Self::SetHate {
                player,
                enemy,
                hate,
            } => {
                for p in players(player) {
                    host.dungeon_mut(p).hates_player[slot(enemy, DUNGEONS_COUNT)] = hate;
                }
            }
            Self::SetGenerateSpeed(speed) => {
                host.rules_mut().generate_speed = speed.clamp(0, u16::MAX as i64) as u16;
            }
            Self::Available {
                player,
                what,
                item,
                first,
                second,
            } => {
                for p in players(player) {
                    apply_availability(host, p, what, item, first, second);
                }
            }
            Self::Research {
                player,
                kind,
                item,
                amount,
            } => {
                for p in players(player) {
                    host.update_or_add_research(p, kind, item, amount);
                }
            }
            Self::ResearchOrder {
                player,
                kind,
                item,
                amount,
            } => {
                for p in players(player) {
                    if !host.research_overridden(p) {
                        host.remove_all_research(p);
                    }
                    host.add_research(p, kind, item, amount);
                }
            }
            Self::SetTimer { player, timer } => {
                let turn = host.game_turn();
                for p in players(player) {
                    host.dungeon_mut(p).turn_timers[timer as usize % TURN_TIMERS_COUNT] =
                        TurnTimer {
                            running: true,
                            started: turn,
                        };
                }
            }
            Self::SetFlag {
                player,
                flag,
                value,
            } => {
                for p in players(player) {
                    host.dungeon_mut(p).script_flags[flag as usize % SCRIPT_FLAGS_COUNT] = value;
                }
            }
            Self::MaxCreatures { player, count } => {
                for p in players(player) {
                    host.dungeon_mut(p).max_creatures = count;
                }
            }
            Self::DisplayObjective {
                message,
                location,
                pos,
            } => {
                if shown_locally(PlayerSelector::All, host) {
                    host.set_general_objective(message, location, pos);
                }
            }
            Self::DisplayInformation {
                message,
                location,
                pos,
            } => {
                if shown_locally(PlayerSelector::All, host) {
                    host.set_general_information(message, location, pos);
                }
            }
            Self::QuickObjective {
                index,
                location,
                pos,
            } => {
                if shown_locally(PlayerSelector::All, host) {
                    host.show_quick_objective(script.quick_message(index), location, pos);
                }
            }
            Self::QuickInformation {
                index,
                location,
                pos,
            } => {
                if shown_locally(PlayerSelector::All, host) {
                    host.show_quick_information(index, script.quick_message(index), location, pos);
                }
            }
            Self::AddCreatureToPool { kind, amount } => host.add_creature_to_pool(kind, amount),
            Self::ResetActionPoint(number) => host.reset_action_point(number),
            Self::TutorialFlashButton { button, duration } => host.flash_button(button, duration),
            Self::SetCreatureMaxLevel {
                player,
                kind,
                level,
            } => {
                for p in players(player) {
                    host.dungeon_mut(p).creature_max_level[kind as usize % CREATURE_TYPES_COUNT] =
                        level;
                }
            }
            Self::SetCreatureStat { kind, stat, value } => {
                let stats = host.creature_stats_mut(kind);
                match stat {
                    CreatureStat::Health => {
                        stats.health = value.clamp(i16::MIN as i64, i16::MAX as i64) as i16
                    }
                    CreatureStat::Strength => stats.strength = saturate_u8(value),
                    CreatureStat::Armour => stats.armour = saturate_u8(value),
                    CreatureStat::Fear => stats.fear = saturate_u8(value),
                }
            }
            Self::AllyPlayers(a, b) => {
                set_ally(host, a, b);
                set_ally(host, b, a);
            }
            Self::DeadCreaturesReturnToPool(on) => host.rules_mut().dead_back_to_pool = on,
            Self::BonusLevelTime(turns) => {
                let rules = host.rules_mut();
                rules.bonus_time = turns;
                rules.countdown_visible = turns > 0;
            }
            Self::PlayMessage {
                player,
                kind,
                message,
            } => {
                if shown_locally(player, host) {
                    match kind {
                        MessageKind::Speech => host.output_message(message),
                        MessageKind::Sound => host.play_sample(message),
                    }
                }
            }
            Self::AddGold { player, amount } => {
                for p in players(player) {
                    host.dungeon_mut(p).add_money(amount);
                }
            }
            Self::SetTendency {
                player,
                tendency,
                value,
            } => {
                for p in players(player) {
                    host.set_creature_tendency(p, tendency, value);
                }
            }
            Self::RevealMapRect {
                player,
                x,
                y,
                width,
                height,
            } => {
                for p in players(player) {
                    log::debug!("Revealing around ({x},{y}) for player {p}");
                    host.reveal_map_area(p, span(x, width), span(y, height));
                }
            }
            Self::RevealMapLocation {
                player,
                location,
                range,
            } => {
                let coords = host.location_coords(location).filter(|&c| c != (0, 0));
                let Some((x, y)) = coords else {
                    log::warn!("Can't decode location {location:?}");
                    return;
                };
                for p in players(player) {
                    host.reveal_map_area(p, span(x, range), span(y, range));
                }
            }
            Self::KillCreature {
                player,
                kind,
                criteria,
                count,
            } => {
                for p in players(player) {
                    let killed = host.kill_creatures(p, kind, criteria, count);
                    log::debug!("Killed {killed} of creature {kind} owned by player {p}");
                }
            }
        }
    }
}

fn saturate_u8(value: i64) -> u8 {
    value.clamp(0, u8::MAX as i64) as u8
}

fn set_ally(host: &mut dyn GameHost, player: u8, ally: u8) {
    if (player as usize) < PLAYERS_COUNT && (ally as usize) < PLAYERS_COUNT {
        host.dungeon_mut(player).allied[ally as usize] = true;
    }
}

fn apply_availability(
    host: &mut dyn GameHost,
    player: u8,
    what: Availability,
    item: u32,
    first: i64,
    second: i64,
) {
    match what {
        Availability::Room => host.set_room_available(player, item, first, second),
        Availability::Creature => {
            if !host.set_creature_available(player, item, first, second) {
                log::warn!("Setting creature {item} availability failed.");
            }
        }
        Availability::Magic => {
            if !host.set_power_available(player, item, first, second) {
                log::warn!("Setting magic {item} availability failed.");
            }
        }
        Availability::Trap => {
            let dungeon = host.dungeon_mut(player);
            let i = item as usize % TRAP_TYPES_COUNT;
            dungeon.trap_buildable[i] = first;
            dungeon.trap_amount[i] = second;
            if second != 0 {
                dungeon.trap_placeable[i] = second;
            }
        }
        Availability::Door => {
            let dungeon = host.dungeon_mut(player);
            let i = item as usize % DOOR_TYPES_COUNT;
            dungeon.door_buildable[i] = first;
            dungeon.door_amount[i] = second;
            if second != 0 {
                dungeon.door_placeable[i] = second;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimHost, SimMessage};

    fn apply(op: ValueOp, host: &mut SimHost) {
        op.apply(&LevelScript::new(), host);
    }

    #[test]
    fn hate_wraps_enemy_index() {
        let mut host = SimHost::new();
        apply(
            ValueOp::SetHate {
                player: PlayerSelector::One(1),
                enemy: 7,
                hate: 30,
            },
            &mut host,
        );
        assert_eq!(host.dungeons[1].hates_player[2], 30);
        assert_eq!(host.dungeons[0].hates_player[2], 0);
    }

    #[test]
    fn generate_speed_saturates() {
        let mut host = SimHost::new();
        apply(ValueOp::SetGenerateSpeed(100_000), &mut host);
        assert_eq!(host.rules.generate_speed, u16::MAX);
        apply(ValueOp::SetGenerateSpeed(250), &mut host);
        assert_eq!(host.rules.generate_speed, 250);
    }

    #[test]
    fn all_players_covers_every_dungeon() {
        let mut host = SimHost::new();
        apply(
            ValueOp::AddGold {
                player: PlayerSelector::All,
                amount: 500,
            },
            &mut host,
        );
        for dungeon in &host.dungeons {
            assert_eq!(dungeon.total_money_owned, 500);
            assert_eq!(dungeon.offmap_money_owned, 500);
        }
    }

    #[test]
    fn trap_amount_zero_keeps_placeable() {
        let mut host = SimHost::new();
        let trap = |second| ValueOp::Available {
            player: PlayerSelector::One(0),
            what: Availability::Trap,
            item: 2,
            first: 1,
            second,
        };
        apply(trap(3), &mut host);
        apply(trap(0), &mut host);
        let d = &host.dungeons[0];
        assert_eq!(d.trap_buildable[2], 1);
        assert_eq!(d.trap_amount[2], 0);
        assert_eq!(d.trap_placeable[2], 3);
    }

    #[test]
    fn timer_records_start_turn() {
        let mut host = SimHost::new();
        host.turn = 120;
        apply(
            ValueOp::SetTimer {
                player: PlayerSelector::One(0),
                timer: 3,
            },
            &mut host,
        );
        assert_eq!(
            host.dungeons[0].turn_timers[3],
            TurnTimer {
                running: true,
                started: 120
            }
        );
    }

    #[test]
    fn alliances_are_mutual() {
        let mut host = SimHost::new();
        apply(ValueOp::AllyPlayers(0, 2), &mut host);
        assert!(host.dungeons[0].allied[2]);
        assert!(host.dungeons[2].allied[0]);
        assert!(!host.dungeons[1].allied[0]);
    }

    #[test]
    fn creature_stats_saturate() {
        let mut host = SimHost::new();
        apply(
            ValueOp::SetCreatureStat {
                kind: 3,
                stat: CreatureStat::Health,
                value: 70_000,
            },
            &mut host,
        );
        apply(
            ValueOp::SetCreatureStat {
                kind: 3,
                stat: CreatureStat::Fear,
                value: -5,
            },
            &mut host,
        );
        assert_eq!(host.creature_stats[3].health, i16::MAX);
        assert_eq!(host.creature_stats[3].fear, 0);
    }

    #[test]
    fn bonus_time_shows_countdown() {
        let mut host = SimHost::new();
        apply(ValueOp::BonusLevelTime(3000), &mut host);
        assert_eq!(host.rules.bonus_time, 3000);
        assert!(host.rules.countdown_visible);
        apply(ValueOp::BonusLevelTime(0), &mut host);
        assert!(!host.rules.countdown_visible);
    }

    #[test]
    fn messages_only_for_local_player() {
        let mut host = SimHost::new();
        host.my_player = 0;
        apply(
            ValueOp::PlayMessage {
                player: PlayerSelector::One(1),
                kind: MessageKind::Speech,
                message: 12,
            },
            &mut host,
        );
        assert!(host.messages.is_empty());
        apply(
            ValueOp::PlayMessage {
                player: PlayerSelector::One(0),
                kind: MessageKind::Sound,
                message: 40,
            },
            &mut host,
        );
        assert_eq!(host.messages, [SimMessage::Sound(40)]);
    }

    #[test]
    fn quick_objective_uses_stored_text() {
        let mut host = SimHost::new();
        let mut script = LevelScript::new();
        script.set_quick_message(5, "Find the gems");
        ValueOp::QuickObjective {
            index: 5,
            location: MapLocation::None,
            pos: SubtilePos::default(),
        }
        .apply(&script, &mut host);
        assert_eq!(
            host.messages,
            [SimMessage::QuickObjective {
                text: "Find the gems".into(),
                location: MapLocation::None,
            }]
        );
    }

    #[test]
    fn reveal_rect_is_centred() {
        let mut host = SimHost::new();
        apply(
            ValueOp::RevealMapRect {
                player: PlayerSelector::One(0),
                x: 20,
                y: 30,
                width: 10,
                height: 4,
            },
            &mut host,
        );
        assert_eq!(host.revealed, [(0, 15..25, 28..32)]);
    }

    #[test]
    fn reveal_unknown_location_is_skipped() {
        let mut host = SimHost::new();
        apply(
            ValueOp::RevealMapLocation {
                player: PlayerSelector::One(0),
                location: MapLocation::ActionPoint(9),
                range: 5,
            },
            &mut host,
        );
        assert!(host.revealed.is_empty());
    }
}
