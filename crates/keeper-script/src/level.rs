//! Conditions, triggers and values registered by a loaded script.
//!
//! Everything lives in fixed-capacity arenas addressed by index handles.
//! Entries are only appended while loading and are never removed until the
//! script is cleared, so handles stay valid for the whole level.

use keeper_types::limits::{
    CONDITIONS_COUNT, CREATURE_PARTYS_COUNT, MESSAGE_TEXT_LEN, PARTY_MEMBERS_COUNT,
    PARTY_TRIGGERS_COUNT, QUICK_MESSAGES_COUNT, SCRIPT_VALUES_COUNT, TUNNELLER_TRIGGERS_COUNT,
    WIN_CONDITIONS_COUNT,
};
use keeper_types::{
    Comparison, ConditionStatus, HeadFor, HeroObjective, MapLocation, PlayerSelector,
    TriggerFlags, Variable,
};
use serde::Serialize;

use crate::error::ScriptError;
use crate::value::ValueOp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConditionId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PartyId(pub usize);

/// What a condition tests each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConditionCheck {
    /// Compare a per-player quantity against a constant.
    Metric {
        variable: Variable,
        /// Creature kind, room, timer, flag, door, trap or power for
        /// indexed variables, otherwise 0.
        index: u32,
        op: Comparison,
        rvalue: i64,
    },
    /// True once the player has entered the action point.
    ActionPoint { number: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    /// Condition of the enclosing `IF` block.
    pub parent: Option<ConditionId>,
    pub player: PlayerSelector,
    pub check: ConditionCheck,
    pub status: ConditionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyMember {
    pub kind: u32,
    /// Experience level, zero based.
    pub level: u8,
    pub gold: i64,
    pub objective: HeroObjective,
    /// Turns before the member starts pursuing its objective.
    pub countdown: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Party {
    pub name: String,
    pub members: Vec<PartyMember>,
}

impl Party {
    pub fn is_full(&self) -> bool {
        self.members.len() >= PARTY_MEMBERS_COUNT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PartySpawn {
    Party {
        party: PartyId,
        copies: i64,
    },
    Creatures {
        kind: u32,
        level: u8,
        gold: i64,
        copies: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyTrigger {
    pub condition: Option<ConditionId>,
    pub flags: TriggerFlags,
    pub player: u8,
    pub location: MapLocation,
    pub spawn: PartySpawn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TunnellerSpawn {
    pub player: u8,
    pub location: MapLocation,
    pub head_for: HeadFor,
    pub target: i64,
    /// Experience level, zero based.
    pub level: u8,
    pub gold: i64,
    /// Party following the tunneller.
    pub party: Option<PartyId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TunnellerTrigger {
    pub condition: Option<ConditionId>,
    pub flags: TriggerFlags,
    pub spawn: TunnellerSpawn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptValue {
    pub condition: Option<ConditionId>,
    pub flags: TriggerFlags,
    pub op: ValueOp,
}

/// Storage for one loaded level script.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LevelScript {
    pub conditions: Vec<Condition>,
    pub party_triggers: Vec<PartyTrigger>,
    pub tunneller_triggers: Vec<TunnellerTrigger>,
    pub values: Vec<ScriptValue>,
    pub parties: Vec<Party>,
    pub win_conditions: Vec<ConditionId>,
    pub lose_conditions: Vec<ConditionId>,
    quick_messages: Vec<String>,
}

fn check_capacity(len: usize, limit: usize, what: &'static str) -> Result<(), ScriptError> {
    if len >= limit {
        return Err(ScriptError::Capacity { what, limit });
    }
    Ok(())
}

impl LevelScript {
    pub fn new() -> Self {
        Self {
            quick_messages: vec![String::new(); QUICK_MESSAGES_COUNT],
            ..Default::default()
        }
    }

    /// Drop everything registered by the script, keeping quick messages.
    pub fn clear(&mut self) {
        let quick_messages = std::mem::take(&mut self.quick_messages);
        *self = Self {
            quick_messages,
            ..Self::new()
        };
    }

    pub fn clear_quick_messages(&mut self) {
        self.quick_messages = vec![String::new(); QUICK_MESSAGES_COUNT];
    }

    pub fn condition(&self, id: ConditionId) -> Option<&Condition> {
        self.conditions.get(id.0)
    }

    /// Whether a trigger gated by `condition` may fire. Entries outside of
    /// any condition are always live.
    pub fn is_condition_met(&self, condition: Option<ConditionId>) -> bool {
        match condition {
            None => true,
            Some(id) => self
                .condition(id)
                .is_some_and(|c| c.status.contains(ConditionStatus::MET)),
        }
    }

    pub fn add_condition(&mut self, condition: Condition) -> Result<ConditionId, ScriptError> {
        check_capacity(self.conditions.len(), CONDITIONS_COUNT, "conditions")?;
        self.conditions.push(condition);
        Ok(ConditionId(self.conditions.len() - 1))
    }

    pub fn add_party_trigger(&mut self, trigger: PartyTrigger) -> Result<(), ScriptError> {
        check_capacity(
            self.party_triggers.len(),
            PARTY_TRIGGERS_COUNT,
            "ADD_CREATURE commands",
        )?;
        self.party_triggers.push(trigger);
        Ok(())
    }

    pub fn add_tunneller_trigger(&mut self, trigger: TunnellerTrigger) -> Result<(), ScriptError> {
        check_capacity(
            self.tunneller_triggers.len(),
            TUNNELLER_TRIGGERS_COUNT,
            "ADD_TUNNELLER commands",
        )?;
        self.tunneller_triggers.push(trigger);
        Ok(())
    }

    pub fn add_value(&mut self, value: ScriptValue) -> Result<(), ScriptError> {
        check_capacity(self.values.len(), SCRIPT_VALUES_COUNT, "VALUEs")?;
        self.values.push(value);
        Ok(())
    }

    pub fn add_win_condition(&mut self, id: ConditionId) -> Result<(), ScriptError> {
        check_capacity(self.win_conditions.len(), WIN_CONDITIONS_COUNT, "WIN GAME conditions")?;
        self.win_conditions.push(id);
        Ok(())
    }

    pub fn add_lose_condition(&mut self, id: ConditionId) -> Result<(), ScriptError> {
        check_capacity(
            self.lose_conditions.len(),
            WIN_CONDITIONS_COUNT,
            "LOSE GAME conditions",
        )?;
        self.lose_conditions.push(id);
        Ok(())
    }

    pub fn find_party(&self, name: &str) -> Option<PartyId> {
        self.parties
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
            .map(PartyId)
    }

    pub fn party(&self, id: PartyId) -> Option<&Party> {
        self.parties.get(id.0)
    }

    pub fn create_party(&mut self, name: &str) -> Result<PartyId, ScriptError> {
        check_capacity(self.parties.len(), CREATURE_PARTYS_COUNT, "parties")?;
        self.parties.push(Party {
            name: name.to_string(),
            members: Vec::new(),
        });
        Ok(PartyId(self.parties.len() - 1))
    }

    pub fn add_party_member(&mut self, id: PartyId, member: PartyMember) -> Result<(), ScriptError> {
        let party = self
            .parties
            .get_mut(id.0)
            .ok_or_else(|| ScriptError::UndefinedParty(id.0.to_string()))?;
        if party.is_full() {
            return Err(ScriptError::PartyFull(party.name.clone()));
        }
        party.members.push(member);
        Ok(())
    }

    pub fn quick_message(&self, index: usize) -> &str {
        self.quick_messages
            .get(index % QUICK_MESSAGES_COUNT)
            .map_or("", String::as_str)
    }

    /// Store the text of a quick message, truncated to fit. Returns true
    /// when a different text was already stored under `index`.
    pub fn set_quick_message(&mut self, index: usize, text: &str) -> bool {
        let text: String = text.chars().take(MESSAGE_TEXT_LEN - 1).collect();
        let Some(slot) = self.quick_messages.get_mut(index) else {
            return false;
        };
        let overwritten = !slot.is_empty() && *slot != text;
        *slot = text;
        overwritten
    }

    pub(crate) fn disable_if_one_shot(flags: &mut TriggerFlags) {
        if !flags.contains(TriggerFlags::REUSABLE) {
            flags.insert(TriggerFlags::DISABLED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(parent: Option<ConditionId>) -> Condition {
        Condition {
            parent,
            player: PlayerSelector::One(0),
            check: ConditionCheck::Metric {
                variable: Variable::Money,
                index: 0,
                op: Comparison::GreaterEqual,
                rvalue: 1000,
            },
            status: ConditionStatus::empty(),
        }
    }

    #[test]
    fn condition_capacity() {
        let mut script = LevelScript::new();
        for i in 0..CONDITIONS_COUNT {
            assert_eq!(script.add_condition(metric(None)), Ok(ConditionId(i)));
        }
        assert_eq!(
            script.add_condition(metric(None)),
            Err(ScriptError::Capacity {
                what: "conditions",
                limit: CONDITIONS_COUNT
            })
        );
        assert_eq!(script.conditions.len(), CONDITIONS_COUNT);
    }

    #[test]
    fn ungated_entries_are_always_met() {
        let mut script = LevelScript::new();
        assert!(script.is_condition_met(None));
        let id = script.add_condition(metric(None)).expect("slot");
        assert!(!script.is_condition_met(Some(id)));
        script.conditions[id.0].status.insert(ConditionStatus::MET);
        assert!(script.is_condition_met(Some(id)));
        assert!(!script.is_condition_met(Some(ConditionId(40))));
    }

    #[test]
    fn parties_by_name() {
        let mut script = LevelScript::new();
        let id = script.create_party("Lords").expect("party");
        assert_eq!(script.find_party("LORDS"), Some(id));
        assert_eq!(script.find_party("knights"), None);

        let member = PartyMember {
            kind: 1,
            level: 0,
            gold: 0,
            objective: HeroObjective::AttackEnemies,
            countdown: 0,
        };
        for _ in 0..PARTY_MEMBERS_COUNT {
            script.add_party_member(id, member.clone()).expect("room");
        }
        assert!(matches!(
            script.add_party_member(id, member),
            Err(ScriptError::PartyFull(_))
        ));
    }

    #[test]
    fn quick_messages() {
        let mut script = LevelScript::new();
        assert!(!script.set_quick_message(3, "hello"));
        assert!(!script.set_quick_message(3, "hello"));
        assert!(script.set_quick_message(3, "bye"));
        assert_eq!(script.quick_message(3), "bye");

        let long = "x".repeat(MESSAGE_TEXT_LEN + 10);
        script.set_quick_message(4, &long);
        assert_eq!(script.quick_message(4).len(), MESSAGE_TEXT_LEN - 1);

        script.clear();
        assert_eq!(script.quick_message(3), "bye");
        script.clear_quick_messages();
        assert_eq!(script.quick_message(3), "");
    }

    #[test]
    fn one_shot_entries_disable() {
        let mut flags = TriggerFlags::empty();
        LevelScript::disable_if_one_shot(&mut flags);
        assert!(flags.contains(TriggerFlags::DISABLED));

        let mut flags = TriggerFlags::REUSABLE;
        LevelScript::disable_if_one_shot(&mut flags);
        assert!(!flags.contains(TriggerFlags::DISABLED));
    }
}
