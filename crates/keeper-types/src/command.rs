use serde::Serialize;
use strum::{EnumCount, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Level script command opcodes.
///
/// Discriminants are the opcode numbers used by the game's script tables, so
/// gaps are opcodes that were never given a script keyword.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    EnumIter,
    EnumCount,
    EnumString,
    FromRepr,
    IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum CommandKind {
    CreateParty = 1,
    AddToParty = 2,
    AddPartyToLevel = 3,
    AddCreatureToLevel = 4,
    Message = 5,
    If = 6,
    Endif = 7,
    SetHate = 8,
    SetGenerateSpeed = 9,
    Rem = 10,
    StartMoney = 11,
    RoomAvailable = 12,
    CreatureAvailable = 13,
    MagicAvailable = 14,
    TrapAvailable = 15,
    Research = 16,
    ComputerPlayer = 17,
    SetTimer = 18,
    IfActionPoint = 19,
    AddTunnellerToLevel = 20,
    WinGame = 21,
    LoseGame = 22,
    SetFlag = 25,
    MaxCreatures = 26,
    NextCommandReusable = 27,
    DoorAvailable = 30,
    DisplayObjective = 37,
    DisplayInformation = 38,
    AddTunnellerPartyToLevel = 40,
    AddCreatureToPool = 41,
    ResetActionPoint = 42,
    QuickObjective = 44,
    QuickInformation = 45,
    QuickObjectiveWithPos = 46,
    QuickInformationWithPos = 47,
    TutorialFlashButton = 54,
    SetCreatureMaxLevel = 59,
    SetMusic = 60,
    SetCreatureHealth = 61,
    SetCreatureStrength = 62,
    SetCreatureArmour = 63,
    SetCreatureFear = 64,
    DisplayObjectiveWithPos = 65,
    IfAvailable = 66,
    SetComputerGlobals = 68,
    SetComputerChecks = 69,
    SetComputerEvent = 70,
    SetComputerProcess = 71,
    AllyPlayers = 72,
    DeadCreaturesReturnToPool = 73,
    DisplayInformationWithPos = 74,
    BonusLevelTime = 75,
    Print = 76,
    SwapCreature = 77,
    SetCreatureTendencies = 84,
    PlayMessage = 85,
    AddGoldToPlayer = 86,
    RevealMapRect = 87,
    RevealMapLocation = 88,
    LevelVersion = 90,
    ResearchOrder = 91,
    KillCreature = 92,
}

impl CommandKind {
    /// Keyword as written in level scripts.
    pub fn keyword(self) -> &'static str {
        self.into()
    }

    /// Commands executed by the preload pass. Everything else runs in the
    /// main pass only.
    pub fn is_preloaded(self) -> bool {
        matches!(self, Self::SwapCreature | Self::LevelVersion)
    }

    /// Commands which open a condition block.
    pub fn opens_condition(self) -> bool {
        matches!(self, Self::If | Self::IfActionPoint | Self::IfAvailable)
    }

    /// Commands which only make sense outside of any condition. They still
    /// execute when found inside one, with a warning.
    pub fn is_setup_only(self) -> bool {
        matches!(
            self,
            Self::CreateParty
                | Self::AddToParty
                | Self::StartMoney
                | Self::ComputerPlayer
                | Self::SetMusic
                | Self::SetComputerGlobals
                | Self::SetComputerChecks
                | Self::SetComputerEvent
                | Self::SetComputerProcess
                | Self::SwapCreature
                | Self::LevelVersion
        )
    }
}
