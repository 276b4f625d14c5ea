//! Firing of party, tunneller and value triggers.

use keeper_types::{HeadFor, MapLocation};

use crate::host::{CreatureId, GameHost};
use crate::level::{LevelScript, Party, PartySpawn, TunnellerSpawn};

/// Creature kind of the hero tunneller.
pub const TUNNELLER_KIND: u32 = 8;
/// Creature kind of the keeper imp.
pub const IMP_KIND: u32 = 23;

fn create_at(host: &mut dyn GameHost, player: u8, kind: u32, location: MapLocation) -> Option<CreatureId> {
    let created = if location.can_spawn() {
        host.create_creature(player, kind, location)
    } else {
        None
    };
    if created.is_none() {
        log::error!("Couldn't create creature breed {kind} at location {location:?}");
    }
    created
}

pub fn create_creature(
    host: &mut dyn GameHost,
    player: u8,
    kind: u32,
    location: MapLocation,
    gold: i64,
    level: u8,
) -> Option<CreatureId> {
    let creature = create_at(host, player, kind, location)?;
    host.init_creature(creature, gold, level);
    Some(creature)
}

pub fn spawn_creatures(
    host: &mut dyn GameHost,
    player: u8,
    kind: u32,
    location: MapLocation,
    copies: i64,
    gold: i64,
    level: u8,
) {
    for _ in 0..copies {
        create_creature(host, player, kind, location, gold, level);
    }
}

/// Create `copies` instances of `party`. Each member joins the group of the
/// member created before it, taking the lead when its level is higher than
/// anyone's in the group. Returns the leader of the last group.
pub fn spawn_party(
    host: &mut dyn GameHost,
    party: &Party,
    player: u8,
    location: MapLocation,
    copies: i64,
) -> Option<CreatureId> {
    let mut leader = None;
    for _ in 0..copies {
        let mut previous: Option<CreatureId> = None;
        leader = None;
        for member in &party.members {
            let Some(creature) =
                create_creature(host, player, member.kind, location, member.gold, member.level)
            else {
                continue;
            };
            let countdown_until = host.game_turn().saturating_add_signed(member.countdown);
            host.set_party_objective(creature, member.objective, countdown_until);
            match previous {
                Some(prev) if host.creature_level(creature) <= host.highest_level_in_group(prev) => {
                    host.add_to_group(creature, prev);
                }
                Some(prev) => {
                    host.add_to_group_as_leader(creature, prev);
                    leader = Some(creature);
                }
                None => leader = Some(creature),
            }
            previous = Some(creature);
        }
    }
    leader
}

pub fn spawn_tunneller(host: &mut dyn GameHost, spawn: &TunnellerSpawn) -> Option<CreatureId> {
    let tunneller = create_creature(
        host,
        spawn.player,
        TUNNELLER_KIND,
        spawn.location,
        spawn.gold,
        spawn.level,
    )?;
    if !host.send_tunneller(tunneller, spawn.head_for, spawn.target) {
        match spawn.head_for {
            HeadFor::AppropriateDungeon => log::warn!("Tunneller has no dungeon to dig to"),
            other => log::warn!("Couldn't send tunneller to {other:?} {}", spawn.target),
        }
    }
    Some(tunneller)
}

/// Tunneller followed by one copy of a party, with the tunneller leading.
pub fn spawn_tunneller_party(host: &mut dyn GameHost, party: &Party, spawn: &TunnellerSpawn) {
    let Some(tunneller) = spawn_tunneller(host, spawn) else {
        log::error!("Couldn't create tunnelling group leader");
        return;
    };
    let Some(group) = spawn_party(host, party, spawn.player, spawn.location, 1) else {
        log::error!("Couldn't create creature group");
        return;
    };
    host.add_to_group_as_leader(tunneller, group);
}

pub fn spawn_party_trigger(
    script: &LevelScript,
    host: &mut dyn GameHost,
    player: u8,
    location: MapLocation,
    spawn: PartySpawn,
) {
    match spawn {
        PartySpawn::Party { party, copies } => match script.party(party) {
            Some(party) => {
                log::debug!("Adding party {}", party.name);
                spawn_party(host, party, player, location, copies);
            }
            None => log::error!("Party {} does not exist", party.0),
        },
        PartySpawn::Creatures {
            kind,
            level,
            gold,
            copies,
        } => {
            log::debug!("Adding creature {kind}");
            spawn_creatures(host, player, kind, location, copies, gold, level);
        }
    }
}

pub fn spawn_tunneller_trigger(script: &LevelScript, host: &mut dyn GameHost, spawn: &TunnellerSpawn) {
    match spawn.party.and_then(|id| script.party(id)) {
        Some(party) => {
            log::debug!("Adding tunneller party {}", party.name);
            spawn_tunneller_party(host, party, spawn);
        }
        None => {
            log::debug!("Adding tunneller, heading {:?}", spawn.head_for);
            spawn_tunneller(host, spawn);
        }
    }
}

pub fn process_party_triggers(script: &mut LevelScript, host: &mut dyn GameHost) {
    for i in 0..script.party_triggers.len() {
        let trigger = &script.party_triggers[i];
        if !trigger.flags.is_live() || !script.is_condition_met(trigger.condition) {
            continue;
        }
        let (player, location, spawn) = (trigger.player, trigger.location, trigger.spawn);
        spawn_party_trigger(script, host, player, location, spawn);
        LevelScript::disable_if_one_shot(&mut script.party_triggers[i].flags);
    }
}

pub fn process_tunneller_triggers(script: &mut LevelScript, host: &mut dyn GameHost) {
    for i in 0..script.tunneller_triggers.len() {
        let trigger = &script.tunneller_triggers[i];
        if !trigger.flags.is_live() || !script.is_condition_met(trigger.condition) {
            continue;
        }
        spawn_tunneller_trigger(script, host, &trigger.spawn);
        LevelScript::disable_if_one_shot(&mut script.tunneller_triggers[i].flags);
    }
}

pub fn process_values(script: &mut LevelScript, host: &mut dyn GameHost) {
    for i in 0..script.values.len() {
        let value = &script.values[i];
        if !value.flags.is_live() || !script.is_condition_met(value.condition) {
            continue;
        }
        log::trace!("Applying value {i}: {:?}", value.op);
        value.op.apply(script, host);
        LevelScript::disable_if_one_shot(&mut script.values[i].flags);
    }
}

/// Mark `player` as winner or loser when any registered win or lose
/// condition is met. Skipped in network games.
pub fn process_win_and_lose(script: &LevelScript, host: &mut dyn GameHost, player: u8) {
    if host.network_active() {
        return;
    }
    for &id in &script.win_conditions {
        if script.is_condition_met(Some(id)) {
            log::debug!("Win condition {} met for player {player}", id.0);
            host.set_player_won(player);
        }
    }
    for &id in &script.lose_conditions {
        if script.is_condition_met(Some(id)) {
            log::debug!("Lose condition {} met for player {player}", id.0);
            host.set_player_lost(player);
        }
    }
}
