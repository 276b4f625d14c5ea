//! Level script interpreter.
//!
//! A level script is a line oriented text file. Loading it registers
//! conditions and the commands gated on them; running it re-evaluates the
//! conditions every game turn and fires whatever they unlock.

pub mod command_table;
pub mod commands;
pub mod condition;
pub mod engine;
pub mod error;
pub mod host;
pub mod level;
pub mod lexer;
pub mod loader;
pub mod names;
pub mod numeric;
pub mod sim;
pub mod trigger;
pub mod value;

pub use engine::{EngineOptions, ScriptEngine};
pub use error::{Diagnostic, ScriptError, Severity};
pub use host::{CreatureId, Dungeon, GameHost, GameRules};
pub use level::{ConditionId, LevelScript, PartyId};
pub use names::NameTables;
pub use sim::SimHost;
