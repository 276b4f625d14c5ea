use keeper_types::UnknownPlayer;
use serde::Serialize;

use crate::lexer::ScanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A message produced while loading or running a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Script line the message refers to, 0 when not tied to a line.
    pub line: usize,
    pub severity: Severity,
    pub message: String,
}

/// Why a single script line was dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Invalid command, '{word}' (lev ver {level_version})")]
    InvalidCommand { word: String, level_version: i64 },
    #[error("Not enough parameters for \"{0}\"")]
    NotEnoughParameters(&'static str),
    #[error(transparent)]
    Player(#[from] UnknownPlayer),
    #[error("Player '{0}' can't be used here")]
    PlayerNotAllowed(String),
    #[error("Unknown {what}, '{name}'")]
    UnknownName { what: &'static str, name: String },
    #[error("{what} {value} out of range")]
    OutOfRange { what: &'static str, value: i64 },
    #[error("Invalid LOCATION = '{0}'")]
    InvalidLocation(String),
    #[error("Non-existing Action Point, no {0}")]
    NoActionPoint(u64),
    #[error("Non-existing Hero Door, no {0}")]
    NoHeroGate(u64),
    #[error("Too many {what} in script (limit is {limit})")]
    Capacity { what: &'static str, limit: usize },
    #[error("Invalid Party '{0}'")]
    UndefinedParty(String),
    #[error("Party '{0}' is full")]
    PartyFull(String),
    #[error("Too many creatures in party '{0}' to add a tunneller")]
    PartyTooBig(String),
    #[error("Unexpected ENDIF")]
    UnexpectedEndif,
    #[error("Command {0} found with no condition")]
    NoCondition(&'static str),
    #[error("No computer {what} found called '{name}'")]
    NoComputerEntry { what: &'static str, name: String },
    #[error("Couldn't swap creature {0}")]
    SwapFailed(String),
}

impl ScriptError {
    pub(crate) fn unknown(what: &'static str, name: &str) -> Self {
        Self::UnknownName {
            what,
            name: name.to_string(),
        }
    }

    pub(crate) fn out_of_range(what: &'static str, value: i64) -> Self {
        Self::OutOfRange { what, value }
    }
}
