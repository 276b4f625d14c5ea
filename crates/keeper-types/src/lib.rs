pub mod command;
pub mod comparison;
pub mod flags;
pub mod limits;
pub mod location;
pub mod objective;
pub mod player;
pub mod variable;

pub use command::CommandKind;
pub use comparison::Comparison;
pub use flags::{ConditionStatus, TriggerFlags};
pub use location::{MapLocation, SubtilePos};
pub use objective::{HeadFor, HeroObjective, KillCriteria, MessageKind, NewCreatureSlot, ResearchKind, Tendency};
pub use player::{PlayerSelector, UnknownPlayer};
pub use variable::Variable;
