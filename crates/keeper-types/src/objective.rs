use serde::Serialize;
use strum::{EnumCount, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Where a tunneller digs towards.
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
pub enum HeadFor {
    ActionPoint = 1,
    Dungeon = 2,
    DungeonHeart = 3,
    #[strum(serialize = "APPROPIATE_DUNGEON", serialize = "APPROPRIATE_DUNGEON")]
    AppropriateDungeon = 4,
}

/// Goal given to each member of a hero party.
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
pub enum HeroObjective {
    AttackRooms = 1,
    AttackEnemies = 2,
    AttackDungeonHeart = 3,
    StealGold = 4,
    StealSpells = 5,
    DefendParty = 6,
}

/// How `PLAY_MESSAGE` plays its sample.
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
pub enum MessageKind {
    Speech = 1,
    Sound = 2,
}

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
pub enum Tendency {
    Imprison = 1,
    Flee = 2,
}

/// Category of a research item.
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
pub enum ResearchKind {
    Magic = 1,
    Room = 2,
    Creature = 3,
}

/// Replacement creature slot of `SWAP_CREATURE`.
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
pub enum NewCreatureSlot {
    NewCreatureA = 1,
    NewCreatureB = 2,
}

/// Which creatures `KILL_CREATURE` picks first.
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
pub enum KillCriteria {
    Anywhere = 0,
    MostExperienced = 1,
    MostExpWandering = 2,
    MostExpWorking = 3,
    MostExpFighting = 4,
    LeastExperienced = 5,
    LeastExpWandering = 6,
    LeastExpWorking = 7,
    LeastExpFighting = 8,
}
