//! Per-tick evaluation of script conditions.

use keeper_types::limits::{
    DOOR_TYPES_COUNT, KEEPER_POWERS_COUNT, ROOM_TYPES_COUNT, SCRIPT_FLAGS_COUNT,
    TRAP_TYPES_COUNT, TURN_TIMERS_COUNT,
};
use keeper_types::player::ALL_PLAYERS;
use keeper_types::{ConditionStatus, Variable};

use crate::host::GameHost;
use crate::level::{Condition, ConditionCheck, LevelScript};

/// Current value of `variable` for `player`.
pub fn condition_value(host: &dyn GameHost, player: u8, variable: Variable, index: u32) -> i64 {
    let dungeon = host.dungeon(player);
    let i = index as usize;
    match variable {
        Variable::Money => dungeon.total_money_owned,
        Variable::GameTurn => host.game_turn() as i64,
        Variable::BreakIn => dungeon.last_break_in,
        Variable::CreatureNum => {
            if index == host.special_digger_kind(player) {
                dungeon.num_active_diggers
            } else {
                host.count_creatures_of_kind(player, index)
            }
        }
        Variable::TotalImps => dungeon.num_active_diggers,
        Variable::TotalCreatures => dungeon.num_active_creatures - dungeon.creatures_not_counted,
        Variable::TotalResearch => dungeon.research_progress / 256,
        Variable::TotalDoors => dungeon.total_doors,
        Variable::TotalArea => dungeon.total_area,
        Variable::TotalCreaturesLeft => dungeon.total_creatures_left,
        Variable::CreaturesAnnoyed => dungeon.creatures_annoyed,
        Variable::BattlesLost => dungeon.battles_lost,
        Variable::BattlesWon => dungeon.battles_won,
        Variable::RoomsDestroyed => dungeon.rooms_destroyed,
        Variable::SpellsStolen => dungeon.spells_stolen,
        Variable::TimesBrokenInto => dungeon.times_broken_into,
        Variable::GoldPotsStolen => dungeon.gold_pots_stolen,
        Variable::Timer => {
            let timer = dungeon.turn_timers[i % TURN_TIMERS_COUNT];
            if timer.running {
                host.game_turn() as i64 - timer.started as i64
            } else {
                0
            }
        }
        Variable::DungeonDestroyed => dungeon.heart_destroyed as i64,
        Variable::TotalGoldMined => dungeon.gold_mined,
        Variable::Flag => dungeon.script_flags[i % SCRIPT_FLAGS_COUNT],
        Variable::RoomSlabs => host.room_slabs(player, index),
        Variable::DoorsDestroyed => dungeon.doors_destroyed,
        Variable::CreaturesScavengedLost => dungeon.creatures_scavenged_lost,
        Variable::CreaturesScavengedGained => dungeon.creatures_scavenged_gained,
        Variable::AvailableMagic => dungeon.magic_level[i % KEEPER_POWERS_COUNT],
        Variable::AvailableTrap => dungeon.trap_amount[i % TRAP_TYPES_COUNT],
        Variable::AvailableDoor => dungeon.door_amount[i % DOOR_TYPES_COUNT],
        Variable::AvailableRoom => dungeon.room_buildable[i % ROOM_TYPES_COUNT],
        Variable::AllDungeonsDestroyed => host.all_dungeons_destroyed(player) as i64,
        Variable::DoorNum => host.doors_of_kind(player, index),
    }
}

/// Whether `player` has entered the action point. The `ALL_PLAYERS` id
/// matches an entry by anyone.
pub fn action_point_activated_by(host: &dyn GameHost, number: u32, player: u8) -> bool {
    let activations = host.action_point_activations(number);
    if player == ALL_PLAYERS {
        activations != 0
    } else {
        1u32.checked_shl(u32::from(player))
            .is_some_and(|bit| activations & bit != 0)
    }
}

fn evaluate(condition: &Condition, host: &dyn GameHost) -> bool {
    let mut players = condition.player.range(host.hero_player());
    match condition.check {
        ConditionCheck::ActionPoint { number } => {
            players.any(|p| action_point_activated_by(host, number, p))
        }
        ConditionCheck::Metric {
            variable,
            index,
            op,
            rvalue,
        } => players.any(|p| op.apply(condition_value(host, p, variable, index), rvalue)),
    }
}

/// Update the status of every condition, parents before children.
pub fn process_conditions(script: &mut LevelScript, host: &dyn GameHost) {
    for i in 0..script.conditions.len() {
        let parent_met = script.conditions[i]
            .parent
            .is_none_or(|parent| script.is_condition_met(Some(parent)));
        let condition = &mut script.conditions[i];
        if !parent_met {
            condition.status.remove(ConditionStatus::MET);
            continue;
        }
        let met = evaluate(condition, host);
        condition.status.set(ConditionStatus::MET, met);
        if !met || condition.status.contains(ConditionStatus::WAS_MET) {
            condition.status.remove(ConditionStatus::NEWLY_MET);
        } else {
            condition
                .status
                .insert(ConditionStatus::WAS_MET | ConditionStatus::NEWLY_MET);
            log::debug!("Condition {i} met for the first time");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::ConditionId;
    use crate::sim::SimHost;
    use keeper_types::{Comparison, PlayerSelector};

    fn money_at_least(player: PlayerSelector, amount: i64, parent: Option<ConditionId>) -> Condition {
        Condition {
            parent,
            player,
            check: ConditionCheck::Metric {
                variable: Variable::Money,
                index: 0,
                op: Comparison::GreaterEqual,
                rvalue: amount,
            },
            status: ConditionStatus::empty(),
        }
    }

    #[test]
    fn status_bits_follow_the_value() {
        let mut host = SimHost::new();
        let mut script = LevelScript::new();
        let id = script
            .add_condition(money_at_least(PlayerSelector::One(0), 1000, None))
            .expect("slot");

        process_conditions(&mut script, &host);
        assert_eq!(script.conditions[id.0].status, ConditionStatus::empty());

        host.dungeons[0].total_money_owned = 1500;
        process_conditions(&mut script, &host);
        assert_eq!(script.conditions[id.0].status, ConditionStatus::all());

        process_conditions(&mut script, &host);
        assert_eq!(
            script.conditions[id.0].status,
            ConditionStatus::MET | ConditionStatus::WAS_MET
        );

        host.dungeons[0].total_money_owned = 10;
        process_conditions(&mut script, &host);
        assert_eq!(script.conditions[id.0].status, ConditionStatus::WAS_MET);

        host.dungeons[0].total_money_owned = 2000;
        process_conditions(&mut script, &host);
        assert_eq!(
            script.conditions[id.0].status,
            ConditionStatus::MET | ConditionStatus::WAS_MET
        );
    }

    #[test]
    fn all_players_is_any_keeper() {
        let mut host = SimHost::new();
        let mut script = LevelScript::new();
        let id = script
            .add_condition(money_at_least(PlayerSelector::All, 1000, None))
            .expect("slot");

        // Heroes are not part of ALL_PLAYERS in conditions.
        host.dungeons[4].total_money_owned = 5000;
        process_conditions(&mut script, &host);
        assert!(!script.is_condition_met(Some(id)));

        host.dungeons[2].total_money_owned = 1000;
        process_conditions(&mut script, &host);
        assert!(script.is_condition_met(Some(id)));
    }

    #[test]
    fn children_follow_parents() {
        let mut host = SimHost::new();
        let mut script = LevelScript::new();
        let parent = script
            .add_condition(money_at_least(PlayerSelector::One(0), 100, None))
            .expect("slot");
        let child = script
            .add_condition(money_at_least(PlayerSelector::One(1), 100, Some(parent)))
            .expect("slot");

        host.dungeons[1].total_money_owned = 500;
        process_conditions(&mut script, &host);
        assert!(!script.is_condition_met(Some(child)));
        assert_eq!(script.conditions[child.0].status, ConditionStatus::empty());

        host.dungeons[0].total_money_owned = 500;
        process_conditions(&mut script, &host);
        assert!(script.is_condition_met(Some(parent)));
        assert!(script.is_condition_met(Some(child)));

        host.dungeons[0].total_money_owned = 0;
        process_conditions(&mut script, &host);
        assert!(!script.is_condition_met(Some(child)));
        assert!(
            script.conditions[child.0]
                .status
                .contains(ConditionStatus::WAS_MET)
        );
    }

    #[test]
    fn action_point_bits() {
        let mut host = SimHost::new();
        host.add_action_point(3, (10, 10));
        assert!(!action_point_activated_by(&host, 3, 1));
        host.activate_action_point(3, 1);
        assert!(action_point_activated_by(&host, 3, 1));
        assert!(!action_point_activated_by(&host, 3, 0));
        assert!(action_point_activated_by(&host, 3, ALL_PLAYERS));

        let mut script = LevelScript::new();
        let id = script
            .add_condition(Condition {
                parent: None,
                player: PlayerSelector::All,
                check: ConditionCheck::ActionPoint { number: 3 },
                status: ConditionStatus::empty(),
            })
            .expect("slot");
        process_conditions(&mut script, &host);
        assert!(script.is_condition_met(Some(id)));
    }

    #[test]
    fn timers_count_elapsed_turns() {
        let mut host = SimHost::new();
        host.turn = 50;
        assert_eq!(condition_value(&host, 0, Variable::Timer, 2), 0);
        host.dungeons[0].turn_timers[2].running = true;
        host.dungeons[0].turn_timers[2].started = 20;
        assert_eq!(condition_value(&host, 0, Variable::Timer, 2), 30);
    }

    #[test]
    fn creature_counts() {
        let mut host = SimHost::new();
        let imp = host.names.creatures.id_of("IMP").expect("imp");
        let horny = host.names.creatures.id_of("HORNY").expect("horny");
        host.dungeons[0].num_active_diggers = 7;
        assert_eq!(condition_value(&host, 0, Variable::CreatureNum, imp), 7);
        assert_eq!(condition_value(&host, 0, Variable::CreatureNum, horny), 0);

        host.dungeons[0].num_active_creatures = 12;
        host.dungeons[0].creatures_not_counted = 2;
        assert_eq!(condition_value(&host, 0, Variable::TotalCreatures, 0), 10);

        host.dungeons[0].research_progress = 256 * 9 + 100;
        assert_eq!(condition_value(&host, 0, Variable::TotalResearch, 0), 9);
    }
}
