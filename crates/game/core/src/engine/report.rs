use crate::activity::ActivityKind;
use crate::state::EntityId;

/// What happened to one activity during a processing pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Advanced a turn and keeps running.
    Continuing,
    /// Reached its last turn; `finish` has run.
    Completed,
    /// Failed or canceled itself; `canceled` has run.
    Canceled { reason: String },
}

/// One activity's entry in a [`TurnReport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityTick {
    pub actor: EntityId,
    pub kind: ActivityKind,
    /// Per-turn AP cost taken from the activity's info.
    pub ap_cost: u32,
    pub outcome: TickOutcome,
}

impl ActivityTick {
    /// True when the tick consumed a turn of work.
    pub fn consumed_turn(&self) -> bool {
        !matches!(self.outcome, TickOutcome::Canceled { .. })
    }
}

/// Result of a processing pass, in registry order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub ticks: Vec<ActivityTick>,
}

impl TurnReport {
    pub fn for_actor(&self, actor: EntityId) -> Option<&ActivityTick> {
        self.ticks.iter().find(|tick| tick.actor == actor)
    }

    pub fn completed(&self) -> impl Iterator<Item = &ActivityTick> {
        self.ticks
            .iter()
            .filter(|tick| tick.outcome == TickOutcome::Completed)
    }

    pub fn canceled(&self) -> impl Iterator<Item = &ActivityTick> {
        self.ticks
            .iter()
            .filter(|tick| matches!(tick.outcome, TickOutcome::Canceled { .. }))
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

/// Registry counts by state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivitySummary {
    pub running: usize,
    pub paused: usize,
    pub completed: usize,
    pub canceled: usize,
}

impl ActivitySummary {
    pub fn total(&self) -> usize {
        self.running + self.paused + self.completed + self.canceled
    }
}
