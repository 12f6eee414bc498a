/// High-level roaming behavior of an AI actor.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RoamingSubState {
    /// Freshly spawned or otherwise unrecognised; the state machine re-initializes it.
    #[default]
    Uninitialized,
    Waiting,
    Driving,
    Chasing,
}

/// Per-actor roaming bookkeeping. Only the AI state machine mutates it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoamingState {
    pub sub_state: RoamingSubState,
    /// Turn number at which the current sub-state began (or was last refreshed).
    pub started_at: u64,
    /// Randomized dwell duration drawn on entry.
    pub planned_turns: u32,
    /// Consecutive updates spent chasing without seeing the target.
    pub turns_without_sight: u32,
}

impl RoamingState {
    pub const fn new(sub_state: RoamingSubState, started_at: u64, planned_turns: u32) -> Self {
        Self {
            sub_state,
            started_at,
            planned_turns,
            turns_without_sight: 0,
        }
    }

    /// Turns elapsed since the sub-state began.
    pub fn elapsed(&self, turn: u64) -> u64 {
        turn.saturating_sub(self.started_at)
    }
}
