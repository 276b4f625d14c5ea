//! Typed script commands.
//!
//! Every scanned line is turned into a [`ScriptCommand`] before it has any
//! effect. All names, numbers and locations are resolved and validated
//! here, so a command which reaches registration can no longer fail on
//! its arguments.

use std::str::FromStr;

use keeper_types::limits::{
    CREATURE_MAX_LEVEL, CREATURES_COUNT, MESSAGE_TEXT_LEN, PARTY_MEMBERS_COUNT, PARTY_NAME_LEN,
    PLAYERS_COUNT, QUICK_MESSAGES_COUNT, RESEARCH_ITEMS_COUNT, STRINGS_MAX,
};
use keeper_types::{
    CommandKind, Comparison, HeadFor, HeroObjective, KillCriteria, MapLocation, MessageKind,
    NewCreatureSlot, PlayerSelector, ResearchKind, SubtilePos, Tendency, Variable,
};

use crate::error::{ScriptError, Severity};
use crate::host::GameHost;
use crate::level::{ConditionCheck, PartyMember, PartySpawn, TunnellerSpawn};
use crate::loader::{Loader, ScriptLine};
use crate::names::{flag_index, timer_index};
use crate::trigger::{IMP_KIND, TUNNELLER_KIND};
use crate::value::{Availability, CreatureStat, ValueOp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Opens a condition block.
    Condition {
        player: PlayerSelector,
        check: ConditionCheck,
    },
    Endif,
    Value(ValueOp),
    Spawn {
        player: u8,
        location: MapLocation,
        spawn: PartySpawn,
    },
    Tunneller(TunnellerSpawn),
    CreateParty(String),
    AddToParty {
        party: String,
        member: PartyMember,
    },
    /// Level setup, always applied as soon as it is read.
    Setup(SetupOp),
    WinGame,
    LoseGame,
    NextCommandReusable,
    LevelVersion(i64),
    /// `PRINT` and `MESSAGE`, which have no effect.
    BetaOnly(&'static str),
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOp {
    StartMoney {
        player: PlayerSelector,
        amount: i64,
    },
    ComputerPlayer {
        player: PlayerSelector,
        model: i64,
    },
    SetMusic(i64),
    ComputerGlobals {
        player: PlayerSelector,
        values: [i64; 6],
    },
    ComputerCheck {
        player: PlayerSelector,
        name: String,
        values: [i64; 5],
    },
    ComputerEvent {
        player: PlayerSelector,
        name: String,
        values: [i64; 2],
    },
    ComputerProcess {
        player: PlayerSelector,
        name: String,
        values: [i64; 5],
    },
    SwapCreature {
        slot: NewCreatureSlot,
        kind: u32,
    },
}

fn players(selector: PlayerSelector) -> impl Iterator<Item = u8> {
    selector.range(PLAYERS_COUNT as u8)
}

fn altered(what: &'static str, name: &str, count: usize) -> Result<(), ScriptError> {
    if count == 0 {
        return Err(ScriptError::NoComputerEntry {
            what,
            name: name.to_string(),
        });
    }
    log::debug!("Altered {count} computer {what}s");
    Ok(())
}

impl SetupOp {
    pub fn apply(&self, host: &mut dyn GameHost) -> Result<(), ScriptError> {
        match self {
            Self::StartMoney { player, amount } => {
                for p in players(*player) {
                    host.dungeon_mut(p).add_money(*amount);
                }
            }
            Self::ComputerPlayer { player, model } => {
                for p in players(*player) {
                    host.setup_computer_player(p, *model);
                }
            }
            Self::SetMusic(track) => host.rules_mut().music_track = *track,
            Self::ComputerGlobals { player, values } => {
                for p in players(*player) {
                    host.set_computer_globals(p, *values);
                }
            }
            Self::ComputerCheck {
                player,
                name,
                values,
            } => {
                let n = players(*player)
                    .map(|p| host.set_computer_check(p, name, *values))
                    .sum();
                altered("check", name, n)?;
            }
            Self::ComputerEvent {
                player,
                name,
                values,
            } => {
                let n = players(*player)
                    .map(|p| host.set_computer_event(p, name, *values))
                    .sum();
                altered("event", name, n)?;
            }
            Self::ComputerProcess {
                player,
                name,
                values,
            } => {
                let n = players(*player)
                    .map(|p| host.set_computer_process(p, name, *values))
                    .sum();
                altered("process", name, n)?;
            }
            Self::SwapCreature { slot, kind } => {
                if !host.swap_creature(*slot, *kind) {
                    return Err(ScriptError::SwapFailed(format!("{slot:?} <-> {kind}")));
                }
            }
        }
        Ok(())
    }
}

fn check_level(level: i64) -> Result<u8, ScriptError> {
    if !(1..=CREATURE_MAX_LEVEL).contains(&level) {
        return Err(ScriptError::out_of_range("creature level", level));
    }
    Ok((level - 1) as u8)
}

fn check_message(message: i64) -> Result<i64, ScriptError> {
    if !(0..STRINGS_MAX).contains(&message) {
        return Err(ScriptError::out_of_range("TEXT number", message));
    }
    Ok(message)
}

fn parse_enum<T: FromStr>(what: &'static str, name: &str) -> Result<T, ScriptError> {
    T::from_str(name).map_err(|_| ScriptError::unknown(what, name))
}

impl Loader<'_> {
    fn player(&self, name: &str) -> Result<PlayerSelector, ScriptError> {
        Ok(PlayerSelector::from_str(name)?)
    }

    /// A player which must be a single keeper, as creatures need an owner.
    fn single_player(&self, name: &str) -> Result<u8, ScriptError> {
        match self.player(name)? {
            PlayerSelector::One(p) => Ok(p),
            PlayerSelector::All => Err(ScriptError::PlayerNotAllowed(name.to_string())),
        }
    }

    fn creature(&self, name: &str) -> Result<u32, ScriptError> {
        self.host
            .names()
            .creatures
            .id_of(name)
            .ok_or_else(|| ScriptError::unknown("creature", name))
    }

    /// Resolve where a command takes effect.
    fn location(&mut self, name: &str) -> Result<MapLocation, ScriptError> {
        if let Ok(player) = PlayerSelector::from_str(name) {
            return Ok(match player {
                PlayerSelector::One(p) => MapLocation::PlayersHeart(p),
                PlayerSelector::All => MapLocation::None,
            });
        }
        let names = self.host.names();
        if let Some(kind) = names.creatures.id_of(name) {
            return Ok(MapLocation::CreatureKind(kind));
        }
        if let Some(room) = names.rooms.id_of(name) {
            return Ok(MapLocation::RoomKind(room));
        }
        let number = crate::numeric::leading_decimal(name);
        match number {
            n if n < 0 => {
                let gate = u32::try_from(n.unsigned_abs())
                    .ok()
                    .filter(|&gate| self.host.hero_gate_exists(gate))
                    .ok_or(ScriptError::NoHeroGate(n.unsigned_abs()))?;
                Ok(MapLocation::HeroGate(gate))
            }
            n if n > 0 => {
                let point = u32::try_from(n)
                    .ok()
                    .filter(|&point| self.host.action_point_exists(point))
                    .ok_or(ScriptError::NoActionPoint(n.unsigned_abs()))?;
                Ok(MapLocation::ActionPoint(point))
            }
            _ => {
                self.state.report(
                    Severity::Error,
                    ScriptError::InvalidLocation(name.to_string()).to_string(),
                );
                Ok(MapLocation::None)
            }
        }
    }

    fn party_id(&self, name: &str) -> Result<crate::level::PartyId, ScriptError> {
        self.script
            .find_party(name)
            .ok_or_else(|| ScriptError::UndefinedParty(name.to_string()))
    }

    fn availability(&self, what: Availability, name: &str) -> Result<u32, ScriptError> {
        let names = self.host.names();
        let (table, label) = match what {
            Availability::Room => (&names.rooms, "room name"),
            Availability::Creature => (&names.creatures, "creature"),
            Availability::Magic => (&names.powers, "magic"),
            Availability::Trap => (&names.traps, "trap"),
            Availability::Door => (&names.doors, "door"),
        };
        table
            .id_of(name)
            .ok_or_else(|| ScriptError::unknown(label, name))
    }

    fn research(&self, line: &ScriptLine) -> Result<(PlayerSelector, ResearchKind, u32), ScriptError> {
        let player = self.player(line.word(0))?;
        let kind: ResearchKind = parse_enum("research type", line.word(1))?;
        let item = self
            .host
            .names()
            .research_item(kind, line.word(2))
            .ok_or_else(|| ScriptError::unknown("research item", line.word(2)))?;
        Ok((player, kind, item))
    }

    /// Variable an `IF` compares, tried as a variable name, then as a
    /// creature, room, timer, flag and door.
    fn if_variable(&self, name: &str) -> Result<(Variable, u32), ScriptError> {
        if let Ok(variable) = Variable::from_str(name) {
            return Ok((variable, 0));
        }
        let names = self.host.names();
        if let Some(kind) = names.creatures.id_of(name) {
            return Ok((Variable::CreatureNum, kind));
        }
        if let Some(room) = names.rooms.id_of(name) {
            return Ok((Variable::RoomSlabs, room));
        }
        if let Some(timer) = timer_index(name) {
            return Ok((Variable::Timer, timer.into()));
        }
        if let Some(flag) = flag_index(name) {
            return Ok((Variable::Flag, flag.into()));
        }
        if let Some(door) = names.doors.id_of(name) {
            return Ok((Variable::DoorNum, door));
        }
        Err(ScriptError::unknown("variable name", name))
    }

    fn available_variable(&self, name: &str) -> Result<(Variable, u32), ScriptError> {
        let names = self.host.names();
        let found = [
            (&names.doors, Variable::AvailableDoor),
            (&names.traps, Variable::AvailableTrap),
            (&names.rooms, Variable::AvailableRoom),
            (&names.powers, Variable::AvailableMagic),
        ]
        .into_iter()
        .find_map(|(table, variable)| table.id_of(name).map(|id| (variable, id)));
        found.ok_or_else(|| ScriptError::unknown("VARIABLE", name))
    }

    fn metric_condition(
        &self,
        line: &ScriptLine,
        variable: (Variable, u32),
    ) -> Result<ScriptCommand, ScriptError> {
        let player = self.player(line.word(0))?;
        let op: Comparison = parse_enum("comparison name", line.word(2))?;
        Ok(ScriptCommand::Condition {
            player,
            check: ConditionCheck::Metric {
                variable: variable.0,
                index: variable.1,
                op,
                rvalue: line.num(3),
            },
        })
    }

    /// Store a quick message text and resolve where it points.
    fn quick_message(
        &mut self,
        line: &ScriptLine,
        with_pos: bool,
    ) -> Result<(usize, MapLocation, SubtilePos), ScriptError> {
        let index = line.num(0);
        if !(0..QUICK_MESSAGES_COUNT as i64).contains(&index) {
            return Err(ScriptError::out_of_range("quick message number", index));
        }
        let index = index as usize;
        let text = line.word(1);
        if text.chars().count() >= MESSAGE_TEXT_LEN {
            self.state.warn(format!(
                "Message TEXT too long; truncating to {} characters",
                MESSAGE_TEXT_LEN - 1
            ));
        }
        if self.script.set_quick_message(index, text) {
            self.state
                .warn(format!("Quick message no {index} overwritten by different text."));
        }
        if with_pos {
            return Ok((index, MapLocation::None, SubtilePos::from_args(line.num(2), line.num(3))));
        }
        let location = if line.len() > 2 {
            self.location(line.word(2))?
        } else {
            MapLocation::None
        };
        Ok((index, location, SubtilePos::default()))
    }

    fn display_text(
        &mut self,
        line: &ScriptLine,
        with_pos: bool,
    ) -> Result<(i64, MapLocation, SubtilePos), ScriptError> {
        let message = check_message(line.num(0))?;
        if with_pos {
            return Ok((message, MapLocation::None, SubtilePos::from_args(line.num(1), line.num(2))));
        }
        let location = if line.len() > 1 {
            self.location(line.word(1))?
        } else {
            MapLocation::None
        };
        Ok((message, location, SubtilePos::default()))
    }

    fn tunneller(&mut self, line: &ScriptLine, party: bool) -> Result<TunnellerSpawn, ScriptError> {
        // The party name sits between the player and the location.
        let shift = usize::from(party);
        let level = check_level(line.num(4 + shift))?;
        let player = self.single_player(line.word(0))?;
        let location = self.location(line.word(1 + shift))?;
        let head_for: HeadFor = parse_enum("heading objective", line.word(2 + shift))?;
        let party = if party {
            let id = self.party_id(line.word(1))?;
            let members = self.script.party(id).map_or(0, |p| p.members.len());
            if members >= PARTY_MEMBERS_COUNT - 1 {
                return Err(ScriptError::PartyTooBig(line.word(1).to_string()));
            }
            Some(id)
        } else {
            None
        };
        Ok(TunnellerSpawn {
            player,
            location,
            head_for,
            target: line.num(3 + shift),
            level,
            gold: line.num(5 + shift),
            party,
        })
    }

    fn creature_stat(&self, line: &ScriptLine, stat: CreatureStat) -> Result<ValueOp, ScriptError> {
        let kind = self.creature(line.word(0))?;
        let value = line.num(1);
        let max = match stat {
            CreatureStat::Health => u16::MAX as i64,
            _ => u8::MAX as i64,
        };
        if !(0..=max).contains(&value) {
            return Err(ScriptError::out_of_range("creature stat value", value));
        }
        Ok(ValueOp::SetCreatureStat { kind, stat, value })
    }

    fn available(&self, line: &ScriptLine, what: Availability) -> Result<ScriptCommand, ScriptError> {
        Ok(ScriptCommand::Value(ValueOp::Available {
            player: self.player(line.word(0))?,
            what,
            item: self.availability(what, line.word(1))?,
            first: line.num(2),
            second: line.num(3),
        }))
    }

    /// Turn a scanned line into a command, validating every argument.
    pub(crate) fn parse_command(&mut self, line: &ScriptLine) -> Result<ScriptCommand, ScriptError> {
        use ScriptCommand as C;
        let command = match line.kind() {
            CommandKind::Rem => C::Comment,
            CommandKind::CreateParty => {
                let name: String = line.word(0).chars().take(PARTY_NAME_LEN - 1).collect();
                C::CreateParty(name)
            }
            CommandKind::AddToParty => {
                let level = check_level(line.num(2))?;
                let kind = self.creature(line.word(1))?;
                let objective: HeroObjective =
                    parse_enum("party member objective", line.word(4))?;
                C::AddToParty {
                    party: line.word(0).to_string(),
                    member: PartyMember {
                        kind,
                        level,
                        gold: line.num(3),
                        objective,
                        countdown: line.num(5),
                    },
                }
            }
            CommandKind::AddPartyToLevel => {
                let copies = line.num(3);
                if copies < 1 {
                    return Err(ScriptError::out_of_range("number of copies", copies));
                }
                let player = self.single_player(line.word(0))?;
                let location = self.location(line.word(2))?;
                let party = self.party_id(line.word(1))?;
                C::Spawn {
                    player,
                    location,
                    spawn: PartySpawn::Party { party, copies },
                }
            }
            CommandKind::AddCreatureToLevel => {
                let level = check_level(line.num(4))?;
                let copies = line.num(3);
                if !(1..CREATURES_COUNT).contains(&copies) {
                    return Err(ScriptError::out_of_range("number of creatures", copies));
                }
                let kind = self.creature(line.word(1))?;
                let player = self.single_player(line.word(0))?;
                let location = self.location(line.word(2))?;
                C::Spawn {
                    player,
                    location,
                    spawn: PartySpawn::Creatures {
                        kind,
                        level,
                        gold: line.num(5),
                        copies,
                    },
                }
            }
            CommandKind::If => {
                let variable = self.if_variable(line.word(1))?;
                self.metric_condition(line, variable)?
            }
            CommandKind::IfAvailable => {
                let variable = self.available_variable(line.word(1))?;
                self.metric_condition(line, variable)?
            }
            CommandKind::IfActionPoint => {
                let number = u32::try_from(line.num(0))
                    .map_err(|_| ScriptError::out_of_range("action point", line.num(0)))?;
                if !self.host.action_point_exists(number) {
                    return Err(ScriptError::NoActionPoint(number.into()));
                }
                C::Condition {
                    player: self.player(line.word(1))?,
                    check: ConditionCheck::ActionPoint { number },
                }
            }
            CommandKind::Endif => C::Endif,
            CommandKind::SetHate => {
                let player = PlayerSelector::from_id(line.num(0))
                    .ok_or_else(|| ScriptError::out_of_range("player", line.num(0)))?;
                C::Value(ValueOp::SetHate {
                    player,
                    enemy: line.num(1),
                    hate: line.num(2),
                })
            }
            CommandKind::SetGenerateSpeed => {
                let speed = line.num(0);
                if speed <= 0 {
                    return Err(ScriptError::out_of_range("generation speed", speed));
                }
                C::Value(ValueOp::SetGenerateSpeed(speed))
            }
            CommandKind::StartMoney => C::Setup(SetupOp::StartMoney {
                player: self.player(line.word(0))?,
                amount: line.num(1),
            }),
            CommandKind::RoomAvailable => self.available(line, Availability::Room)?,
            CommandKind::CreatureAvailable => self.available(line, Availability::Creature)?,
            CommandKind::MagicAvailable => self.available(line, Availability::Magic)?,
            CommandKind::TrapAvailable => self.available(line, Availability::Trap)?,
            CommandKind::DoorAvailable => self.available(line, Availability::Door)?,
            CommandKind::Research => {
                let (player, kind, item) = self.research(line)?;
                C::Value(ValueOp::Research {
                    player,
                    kind,
                    item,
                    amount: line.num(3),
                })
            }
            CommandKind::ResearchOrder => {
                let player = self.player(line.word(0))?;
                if players(player).any(|p| self.host.research_count(p) >= RESEARCH_ITEMS_COUNT) {
                    return Err(ScriptError::Capacity {
                        what: "RESEARCH ITEMS",
                        limit: RESEARCH_ITEMS_COUNT,
                    });
                }
                let (player, kind, item) = self.research(line)?;
                C::Value(ValueOp::ResearchOrder {
                    player,
                    kind,
                    item,
                    amount: line.num(3),
                })
            }
            CommandKind::ComputerPlayer => C::Setup(SetupOp::ComputerPlayer {
                player: self.player(line.word(0))?,
                model: line.num(1),
            }),
            CommandKind::SetTimer => {
                let player = self.player(line.word(0))?;
                let timer = timer_index(line.word(1))
                    .ok_or_else(|| ScriptError::unknown("timer", line.word(1)))?;
                C::Value(ValueOp::SetTimer { player, timer })
            }
            CommandKind::AddTunnellerToLevel => C::Tunneller(self.tunneller(line, false)?),
            CommandKind::AddTunnellerPartyToLevel => C::Tunneller(self.tunneller(line, true)?),
            CommandKind::WinGame => C::WinGame,
            CommandKind::LoseGame => C::LoseGame,
            CommandKind::SetFlag => {
                let player = self.player(line.word(0))?;
                let flag = flag_index(line.word(1))
                    .ok_or_else(|| ScriptError::unknown("flag", line.word(1)))?;
                C::Value(ValueOp::SetFlag {
                    player,
                    flag,
                    value: line.num(2),
                })
            }
            CommandKind::MaxCreatures => C::Value(ValueOp::MaxCreatures {
                player: self.player(line.word(0))?,
                count: line.num(1),
            }),
            CommandKind::NextCommandReusable => C::NextCommandReusable,
            CommandKind::DisplayObjective | CommandKind::DisplayObjectiveWithPos => {
                let with_pos = line.kind() == CommandKind::DisplayObjectiveWithPos;
                let (message, location, pos) = self.display_text(line, with_pos)?;
                C::Value(ValueOp::DisplayObjective {
                    message,
                    location,
                    pos,
                })
            }
            CommandKind::DisplayInformation | CommandKind::DisplayInformationWithPos => {
                let with_pos = line.kind() == CommandKind::DisplayInformationWithPos;
                let (message, location, pos) = self.display_text(line, with_pos)?;
                C::Value(ValueOp::DisplayInformation {
                    message,
                    location,
                    pos,
                })
            }
            CommandKind::QuickObjective | CommandKind::QuickObjectiveWithPos => {
                let with_pos = line.kind() == CommandKind::QuickObjectiveWithPos;
                let (index, location, pos) = self.quick_message(line, with_pos)?;
                C::Value(ValueOp::QuickObjective {
                    index,
                    location,
                    pos,
                })
            }
            CommandKind::QuickInformation | CommandKind::QuickInformationWithPos => {
                let with_pos = line.kind() == CommandKind::QuickInformationWithPos;
                let (index, location, pos) = self.quick_message(line, with_pos)?;
                C::Value(ValueOp::QuickInformation {
                    index,
                    location,
                    pos,
                })
            }
            CommandKind::AddCreatureToPool => {
                let kind = self.creature(line.word(0))?;
                let amount = line.num(1);
                if !(0..CREATURES_COUNT).contains(&amount) {
                    return Err(ScriptError::out_of_range("number of creatures for pool", amount));
                }
                C::Value(ValueOp::AddCreatureToPool { kind, amount })
            }
            CommandKind::ResetActionPoint => {
                let number = u32::try_from(line.num(0))
                    .map_err(|_| ScriptError::out_of_range("action point", line.num(0)))?;
                if !self.host.action_point_exists(number) {
                    return Err(ScriptError::NoActionPoint(number.into()));
                }
                C::Value(ValueOp::ResetActionPoint(number))
            }
            CommandKind::SetCreatureMaxLevel => {
                let player = self.player(line.word(0))?;
                let kind = self.creature(line.word(1))?;
                let level = line.num(2);
                if !(1..=CREATURE_MAX_LEVEL).contains(&level) {
                    self.state.report(
                        Severity::Error,
                        format!("Invalid '{}' experience level, {level}", line.word(1)),
                    );
                }
                C::Value(ValueOp::SetCreatureMaxLevel {
                    player,
                    kind,
                    level: level.saturating_sub(1),
                })
            }
            CommandKind::SetMusic => C::Setup(SetupOp::SetMusic(line.num(0))),
            CommandKind::TutorialFlashButton => C::Value(ValueOp::TutorialFlashButton {
                button: line.num(0),
                duration: line.num(1),
            }),
            CommandKind::SetCreatureHealth => C::Value(self.creature_stat(line, CreatureStat::Health)?),
            CommandKind::SetCreatureStrength => {
                C::Value(self.creature_stat(line, CreatureStat::Strength)?)
            }
            CommandKind::SetCreatureArmour => C::Value(self.creature_stat(line, CreatureStat::Armour)?),
            CommandKind::SetCreatureFear => C::Value(self.creature_stat(line, CreatureStat::Fear)?),
            CommandKind::SetComputerGlobals => C::Setup(SetupOp::ComputerGlobals {
                player: self.player(line.word(0))?,
                values: std::array::from_fn(|i| line.num(i + 1)),
            }),
            CommandKind::SetComputerChecks => C::Setup(SetupOp::ComputerCheck {
                player: self.player(line.word(0))?,
                name: line.word(1).to_string(),
                values: std::array::from_fn(|i| line.num(i + 2)),
            }),
            CommandKind::SetComputerEvent => C::Setup(SetupOp::ComputerEvent {
                player: self.player(line.word(0))?,
                name: line.word(1).to_string(),
                values: std::array::from_fn(|i| line.num(i + 2)),
            }),
            CommandKind::SetComputerProcess => C::Setup(SetupOp::ComputerProcess {
                player: self.player(line.word(0))?,
                name: line.word(1).to_string(),
                values: std::array::from_fn(|i| line.num(i + 2)),
            }),
            CommandKind::AllyPlayers => C::Value(ValueOp::AllyPlayers(
                self.single_player(line.word(0))?,
                self.single_player(line.word(1))?,
            )),
            CommandKind::DeadCreaturesReturnToPool => {
                C::Value(ValueOp::DeadCreaturesReturnToPool(line.num(0) != 0))
            }
            CommandKind::BonusLevelTime => {
                let turns = line.num(0);
                if turns < 0 {
                    return Err(ScriptError::out_of_range("bonus time", turns));
                }
                C::Value(ValueOp::BonusLevelTime(turns))
            }
            CommandKind::SwapCreature => {
                let slot: NewCreatureSlot = parse_enum("new creature", line.word(0))?;
                let kind = self.creature(line.word(1))?;
                if kind == IMP_KIND || kind == TUNNELLER_KIND {
                    self.state
                        .report(Severity::Error, "Unable to swap IMPs or TUNNELLERs");
                }
                C::Setup(SetupOp::SwapCreature { slot, kind })
            }
            CommandKind::Print | CommandKind::Message => C::BetaOnly(line.desc.keyword),
            CommandKind::PlayMessage => C::Value(ValueOp::PlayMessage {
                player: self.player(line.word(0))?,
                kind: parse_enum::<MessageKind>("message type", line.word(1))?,
                message: line.num(2),
            }),
            CommandKind::AddGoldToPlayer => C::Value(ValueOp::AddGold {
                player: self.player(line.word(0))?,
                amount: line.num(1),
            }),
            CommandKind::SetCreatureTendencies => C::Value(ValueOp::SetTendency {
                player: self.player(line.word(0))?,
                tendency: parse_enum::<Tendency>("tendency type", line.word(1))?,
                value: line.num(2),
            }),
            CommandKind::RevealMapRect => C::Value(ValueOp::RevealMapRect {
                player: self.player(line.word(0))?,
                x: line.num(1),
                y: line.num(2),
                width: line.num(3),
                height: line.num(4),
            }),
            CommandKind::RevealMapLocation => {
                let player = self.player(line.word(0))?;
                let location = self.location(line.word(1))?;
                C::Value(ValueOp::RevealMapLocation {
                    player,
                    location,
                    range: line.num(2),
                })
            }
            CommandKind::LevelVersion => C::LevelVersion(line.num(0)),
            CommandKind::KillCreature => {
                let player = self.player(line.word(0))?;
                let count = line.num(3);
                if count <= 0 {
                    return Err(ScriptError::out_of_range("creatures count", count));
                }
                let kind = self.creature(line.word(1))?;
                let criteria: KillCriteria =
                    parse_enum("creature selection criteria", line.word(2))?;
                C::Value(ValueOp::KillCreature {
                    player,
                    kind,
                    criteria,
                    count,
                })
            }
        };
        Ok(command)
    }
}
