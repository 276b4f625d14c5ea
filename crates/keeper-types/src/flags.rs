use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Lifecycle flags shared by party triggers, tunneller triggers and
    /// deferred values.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
    pub struct TriggerFlags: u8 {
        const REUSABLE = 0x01;
        const DISABLED = 0x02;
    }
}

bitflags! {
    /// Per-tick status of a condition.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
    pub struct ConditionStatus: u8 {
        /// Currently true, and the parent condition is met.
        const MET       = 0x01;
        /// Has been true at least once.
        const WAS_MET   = 0x02;
        /// Became true for the first time on this tick.
        const NEWLY_MET = 0x04;
    }
}

impl TriggerFlags {
    /// Whether a trigger with these flags may still fire.
    pub fn is_live(self) -> bool {
        !self.contains(Self::DISABLED)
    }
}
