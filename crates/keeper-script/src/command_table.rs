//! Command keyword tables.
//!
//! Two grammars exist: the DK1 one, used while the level version is
//! 0, and the extended one selected by `LEVEL_VERSION(1)` or higher. They
//! differ in a handful of signatures and in which keywords exist at all.

use keeper_types::CommandKind;
use keeper_types::limits::COMMANDDESC_ARGS_COUNT;

/// Level version assumed until a `LEVEL_VERSION` command says otherwise.
pub const DEFAULT_LEVEL_VERSION: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Taken as a word: a name, location or text.
    Word,
    /// Parsed into a number.
    Number,
}

/// One keyword of a grammar and the arguments it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDesc {
    pub keyword: &'static str,
    /// One letter per argument: `A` for a word, `N` for a number.
    pub args: &'static str,
    pub kind: CommandKind,
}

const fn desc(keyword: &'static str, args: &'static str, kind: CommandKind) -> CommandDesc {
    CommandDesc {
        keyword,
        args,
        kind,
    }
}

impl CommandDesc {
    pub fn arg_kinds(&self) -> impl Iterator<Item = ArgKind> + '_ {
        self.args.chars().map(|c| match c {
            'N' | 'n' => ArgKind::Number,
            _ => ArgKind::Word,
        })
    }

    pub fn arg_count(&self) -> usize {
        self.args.len().min(COMMANDDESC_ARGS_COUNT)
    }

    /// Number of leading arguments that must be present. Lower-case letters
    /// mark optional trailing arguments.
    pub fn required_args(&self) -> usize {
        self.args
            .chars()
            .take_while(|c| c.is_ascii_uppercase())
            .count()
    }
}

pub static COMMAND_DESC: &[CommandDesc] = &[
    desc("CREATE_PARTY", "A", CommandKind::CreateParty),
    desc("ADD_TO_PARTY", "AANNAN", CommandKind::AddToParty),
    desc("ADD_PARTY_TO_LEVEL", "AAAN", CommandKind::AddPartyToLevel),
    desc("ADD_CREATURE_TO_LEVEL", "AAANNN", CommandKind::AddCreatureToLevel),
    desc("IF", "AAAN", CommandKind::If),
    desc("IF_ACTION_POINT", "NA", CommandKind::IfActionPoint),
    desc("ENDIF", "", CommandKind::Endif),
    desc("SET_HATE", "NNN", CommandKind::SetHate),
    desc("SET_GENERATE_SPEED", "N", CommandKind::SetGenerateSpeed),
    desc("REM", "", CommandKind::Rem),
    desc("START_MONEY", "AN", CommandKind::StartMoney),
    desc("ROOM_AVAILABLE", "AANN", CommandKind::RoomAvailable),
    desc("CREATURE_AVAILABLE", "AANN", CommandKind::CreatureAvailable),
    desc("MAGIC_AVAILABLE", "AANN", CommandKind::MagicAvailable),
    desc("TRAP_AVAILABLE", "AANN", CommandKind::TrapAvailable),
    desc("RESEARCH", "AAAN", CommandKind::Research),
    desc("RESEARCH_ORDER", "AAAN", CommandKind::ResearchOrder),
    desc("COMPUTER_PLAYER", "AN", CommandKind::ComputerPlayer),
    desc("SET_TIMER", "AA", CommandKind::SetTimer),
    desc("ADD_TUNNELLER_TO_LEVEL", "AAANNN", CommandKind::AddTunnellerToLevel),
    desc("WIN_GAME", "", CommandKind::WinGame),
    desc("LOSE_GAME", "", CommandKind::LoseGame),
    desc("SET_FLAG", "AAN", CommandKind::SetFlag),
    desc("MAX_CREATURES", "AN", CommandKind::MaxCreatures),
    desc("NEXT_COMMAND_REUSABLE", "", CommandKind::NextCommandReusable),
    desc("DOOR_AVAILABLE", "AANN", CommandKind::DoorAvailable),
    desc("DISPLAY_OBJECTIVE", "NA", CommandKind::DisplayObjective),
    desc("DISPLAY_OBJECTIVE_WITH_POS", "NNN", CommandKind::DisplayObjectiveWithPos),
    desc("DISPLAY_INFORMATION", "NA", CommandKind::DisplayInformation),
    desc("DISPLAY_INFORMATION_WITH_POS", "NNN", CommandKind::DisplayInformationWithPos),
    desc("ADD_TUNNELLER_PARTY_TO_LEVEL", "AAAANNN", CommandKind::AddTunnellerPartyToLevel),
    desc("ADD_CREATURE_TO_POOL", "AN", CommandKind::AddCreatureToPool),
    desc("RESET_ACTION_POINT", "N", CommandKind::ResetActionPoint),
    desc("SET_CREATURE_MAX_LEVEL", "AAN", CommandKind::SetCreatureMaxLevel),
    desc("SET_MUSIC", "N", CommandKind::SetMusic),
    desc("TUTORIAL_FLASH_BUTTON", "NN", CommandKind::TutorialFlashButton),
    desc("SET_CREATURE_STRENGTH", "AN", CommandKind::SetCreatureStrength),
    desc("SET_CREATURE_HEALTH", "AN", CommandKind::SetCreatureHealth),
    desc("SET_CREATURE_ARMOUR", "AN", CommandKind::SetCreatureArmour),
    desc("SET_CREATURE_FEAR", "AN", CommandKind::SetCreatureFear),
    desc("IF_AVAILABLE", "AAAN", CommandKind::IfAvailable),
    desc("SET_COMPUTER_GLOBALS", "ANNNNNN", CommandKind::SetComputerGlobals),
    desc("SET_COMPUTER_CHECKS", "AANNNNN", CommandKind::SetComputerChecks),
    desc("SET_COMPUTER_EVENT", "AANN", CommandKind::SetComputerEvent),
    desc("SET_COMPUTER_PROCESS", "AANNNNN", CommandKind::SetComputerProcess),
    desc("ALLY_PLAYERS", "AA", CommandKind::AllyPlayers),
    desc("DEAD_CREATURES_RETURN_TO_POOL", "N", CommandKind::DeadCreaturesReturnToPool),
    desc("BONUS_LEVEL_TIME", "N", CommandKind::BonusLevelTime),
    desc("QUICK_OBJECTIVE", "NAA", CommandKind::QuickObjective),
    desc("QUICK_INFORMATION", "NAA", CommandKind::QuickInformation),
    desc("QUICK_OBJECTIVE_WITH_POS", "NANN", CommandKind::QuickObjectiveWithPos),
    desc("QUICK_INFORMATION_WITH_POS", "NANN", CommandKind::QuickInformationWithPos),
    desc("SWAP_CREATURE", "AA", CommandKind::SwapCreature),
    desc("PRINT", "A", CommandKind::Print),
    desc("MESSAGE", "A", CommandKind::Message),
    desc("PLAY_MESSAGE", "AAN", CommandKind::PlayMessage),
    desc("ADD_GOLD_TO_PLAYER", "AN", CommandKind::AddGoldToPlayer),
    desc("SET_CREATURE_TENDENCIES", "AAN", CommandKind::SetCreatureTendencies),
    desc("REVEAL_MAP_RECT", "ANNNN", CommandKind::RevealMapRect),
    desc("REVEAL_MAP_LOCATION", "AAN", CommandKind::RevealMapLocation),
    desc("LEVEL_VERSION", "N", CommandKind::LevelVersion),
    desc("KILL_CREATURE", "AAAN", CommandKind::KillCreature),
];

pub static DK1_COMMAND_DESC: &[CommandDesc] = &[
    desc("CREATE_PARTY", "A", CommandKind::CreateParty),
    desc("ADD_TO_PARTY", "AANNAN", CommandKind::AddToParty),
    desc("ADD_PARTY_TO_LEVEL", "AAAN", CommandKind::AddPartyToLevel),
    desc("ADD_CREATURE_TO_LEVEL", "AAANNN", CommandKind::AddCreatureToLevel),
    desc("IF", "AAAN", CommandKind::If),
    desc("IF_ACTION_POINT", "NA", CommandKind::IfActionPoint),
    desc("ENDIF", "", CommandKind::Endif),
    desc("SET_HATE", "NNN", CommandKind::SetHate),
    desc("SET_GENERATE_SPEED", "N", CommandKind::SetGenerateSpeed),
    desc("REM", "", CommandKind::Rem),
    desc("START_MONEY", "AN", CommandKind::StartMoney),
    desc("ROOM_AVAILABLE", "AANN", CommandKind::RoomAvailable),
    desc("CREATURE_AVAILABLE", "AANN", CommandKind::CreatureAvailable),
    desc("MAGIC_AVAILABLE", "AANN", CommandKind::MagicAvailable),
    desc("TRAP_AVAILABLE", "AANN", CommandKind::TrapAvailable),
    desc("RESEARCH", "AAAN", CommandKind::ResearchOrder),
    desc("COMPUTER_PLAYER", "AN", CommandKind::ComputerPlayer),
    desc("SET_TIMER", "AA", CommandKind::SetTimer),
    desc("ADD_TUNNELLER_TO_LEVEL", "AAANNN", CommandKind::AddTunnellerToLevel),
    desc("WIN_GAME", "", CommandKind::WinGame),
    desc("LOSE_GAME", "", CommandKind::LoseGame),
    desc("SET_FLAG", "AAN", CommandKind::SetFlag),
    desc("MAX_CREATURES", "AN", CommandKind::MaxCreatures),
    desc("NEXT_COMMAND_REUSABLE", "", CommandKind::NextCommandReusable),
    desc("DOOR_AVAILABLE", "AANN", CommandKind::DoorAvailable),
    desc("DISPLAY_OBJECTIVE", "NA", CommandKind::DisplayObjective),
    desc("DISPLAY_OBJECTIVE_WITH_POS", "NNN", CommandKind::DisplayObjectiveWithPos),
    desc("DISPLAY_INFORMATION", "N", CommandKind::DisplayInformation),
    desc("DISPLAY_INFORMATION_WITH_POS", "NNN", CommandKind::DisplayInformationWithPos),
    desc("ADD_TUNNELLER_PARTY_TO_LEVEL", "AAAANNN", CommandKind::AddTunnellerPartyToLevel),
    desc("ADD_CREATURE_TO_POOL", "AN", CommandKind::AddCreatureToPool),
    desc("RESET_ACTION_POINT", "N", CommandKind::ResetActionPoint),
    desc("SET_CREATURE_MAX_LEVEL", "AAN", CommandKind::SetCreatureMaxLevel),
    desc("SET_MUSIC", "N", CommandKind::SetMusic),
    desc("TUTORIAL_FLASH_BUTTON", "NN", CommandKind::TutorialFlashButton),
    desc("SET_CREATURE_STRENGTH", "AN", CommandKind::SetCreatureStrength),
    desc("SET_CREATURE_HEALTH", "AN", CommandKind::SetCreatureHealth),
    desc("SET_CREATURE_ARMOUR", "AN", CommandKind::SetCreatureArmour),
    desc("SET_CREATURE_FEAR", "AN", CommandKind::SetCreatureFear),
    desc("IF_AVAILABLE", "AAAN", CommandKind::IfAvailable),
    desc("SET_COMPUTER_GLOBALS", "ANNNNNN", CommandKind::SetComputerGlobals),
    desc("SET_COMPUTER_CHECKS", "AANNNNN", CommandKind::SetComputerChecks),
    desc("SET_COMPUTER_EVENT", "AANN", CommandKind::SetComputerEvent),
    desc("SET_COMPUTER_PROCESS", "AANNNNN", CommandKind::SetComputerProcess),
    desc("ALLY_PLAYERS", "AA", CommandKind::AllyPlayers),
    desc("DEAD_CREATURES_RETURN_TO_POOL", "N", CommandKind::DeadCreaturesReturnToPool),
    desc("BONUS_LEVEL_TIME", "N", CommandKind::BonusLevelTime),
    desc("QUICK_OBJECTIVE", "NAA", CommandKind::QuickObjective),
    desc("QUICK_INFORMATION", "NA", CommandKind::QuickInformation),
    desc("SWAP_CREATURE", "AA", CommandKind::SwapCreature),
    desc("PRINT", "A", CommandKind::Print),
    desc("MESSAGE", "A", CommandKind::Message),
    desc("LEVEL_VERSION", "N", CommandKind::LevelVersion),
];

/// Grammar in effect for the given level version.
pub fn command_table(level_version: i64) -> &'static [CommandDesc] {
    if level_version > 0 {
        COMMAND_DESC
    } else {
        DK1_COMMAND_DESC
    }
}

/// Look up an upper-cased keyword in the grammar of `level_version`.
pub fn find_command(keyword: &str, level_version: i64) -> Option<&'static CommandDesc> {
    command_table(level_version)
        .iter()
        .find(|d| d.keyword == keyword)
}

/// Keyword of a command in the extended grammar.
pub fn command_name(kind: CommandKind) -> Option<&'static str> {
    COMMAND_DESC
        .iter()
        .find(|d| d.kind == kind)
        .map(|d| d.keyword)
}
