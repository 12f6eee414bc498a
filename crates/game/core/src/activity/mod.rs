//! Activities: one unit of (possibly multi-turn) work bound to one actor.
//!
//! An [`Activity`] is a small state machine with progress tracking. What it
//! actually does each turn is decided by its [`Behavior`], a sum type with
//! one variant per [`ActivityKind`] dispatched through [`ActivityBehavior`].
//!
//! ```text
//!            interrupt            complete
//!   Running ─────────▶ Paused    Running ─────────▶ Completed
//!      ▲                 │
//!      └──── resume ─────┘       Running | Paused ──cancel──▶ Canceled
//! ```
pub mod behavior;
mod error;
mod kind;

pub use behavior::{
    ActivityBehavior, AttackBehavior, Behavior, CloseDoorBehavior, CraftBehavior,
    InteractBehavior, MoveBehavior, OpenDoorBehavior, PickUpBehavior, ReadBehavior,
    RestBehavior, TalkBehavior, UseItemBehavior, WaitBehavior, WarpBehavior,
};
pub use error::{ActivityError, TransitionError};
pub use kind::{ActivityInfo, ActivityKind, calculate_required_turns};

use crate::state::{EntityId, Position};

/// Lifecycle state of an [`Activity`]. Exactly one holds at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActivityState {
    #[default]
    Running,
    Paused,
    Completed,
    Canceled,
}

impl ActivityState {
    /// Completed or Canceled: the manager evicts these after the current pass.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }
}

/// One in-progress or finished unit of work for one actor.
///
/// `turns_left` only ever decreases, and reaching zero always means
/// [`ActivityState::Completed`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activity {
    behavior: Behavior,
    info: ActivityInfo,
    state: ActivityState,
    turns_total: u32,
    turns_left: u32,
    actor: EntityId,
    target: Option<EntityId>,
    position: Option<Position>,
    cancel_reason: Option<String>,
}

impl Activity {
    /// Creates a running activity lasting `turns` turns (0 clamps to 1).
    pub fn new(behavior: Behavior, actor: EntityId, info: ActivityInfo, turns: u32) -> Self {
        let turns = turns.max(1);
        Self {
            behavior,
            info,
            state: ActivityState::Running,
            turns_total: turns,
            turns_left: turns,
            actor,
            target: None,
            position: None,
            cancel_reason: None,
        }
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn kind(&self) -> ActivityKind {
        self.behavior.kind()
    }

    pub fn info(&self) -> &ActivityInfo {
        &self.info
    }

    pub fn state(&self) -> ActivityState {
        self.state
    }

    pub fn turns_total(&self) -> u32 {
        self.turns_total
    }

    pub fn turns_left(&self) -> u32 {
        self.turns_left
    }

    pub fn actor(&self) -> EntityId {
        self.actor
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Reason recorded by the last interrupt or cancel.
    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.state == ActivityState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == ActivityState::Paused
    }

    pub fn is_completed(&self) -> bool {
        self.state == ActivityState::Completed
    }

    pub fn is_canceled(&self) -> bool {
        self.state == ActivityState::Canceled
    }

    pub fn can_interrupt(&self) -> bool {
        self.info.interruptible && self.state == ActivityState::Running
    }

    pub fn can_resume(&self) -> bool {
        self.info.resumable && self.state == ActivityState::Paused
    }

    /// Share of the work done so far, in percent.
    pub fn progress_percent(&self) -> f32 {
        if self.turns_total == 0 {
            return 100.0;
        }
        let done = self.turns_total - self.turns_left;
        done as f32 / self.turns_total as f32 * 100.0
    }

    /// Pauses a running, interruptible activity.
    pub fn interrupt(&mut self, reason: impl Into<String>) -> Result<(), TransitionError> {
        if !self.info.interruptible {
            return Err(TransitionError::NotInterruptible(self.kind()));
        }
        if self.state != ActivityState::Running {
            return Err(TransitionError::NotRunning {
                kind: self.kind(),
                state: self.state,
            });
        }
        self.state = ActivityState::Paused;
        self.cancel_reason = Some(reason.into());
        Ok(())
    }

    /// Checks the preconditions of [`resume`](Self::resume) without changing anything.
    pub fn ensure_resumable(&self) -> Result<(), TransitionError> {
        if self.state != ActivityState::Paused {
            return Err(TransitionError::NotPaused {
                kind: self.kind(),
                state: self.state,
            });
        }
        if !self.info.resumable {
            return Err(TransitionError::NotResumable(self.kind()));
        }
        Ok(())
    }

    /// Returns a paused, resumable activity to Running and clears the reason.
    pub fn resume(&mut self) -> Result<(), TransitionError> {
        self.ensure_resumable()?;
        self.state = ActivityState::Running;
        self.cancel_reason = None;
        Ok(())
    }

    /// Cancels the activity. Always succeeds on a live activity.
    ///
    /// Cancel is not applied to terminal activities: a completed activity
    /// stays completed (its `finish` already ran, so `canceled` must not), and
    /// a second cancel keeps the first reason. Returns whether the state
    /// changed.
    pub fn cancel(&mut self, reason: impl Into<String>) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = ActivityState::Canceled;
        self.cancel_reason = Some(reason.into());
        true
    }

    /// Forces completion. Idempotent.
    pub fn complete(&mut self) {
        self.turns_left = 0;
        self.state = ActivityState::Completed;
        self.cancel_reason = None;
    }

    /// Consumes one turn of a running activity, completing it on the last one.
    ///
    /// Returns the turns still left.
    pub fn advance(&mut self) -> u32 {
        if self.state != ActivityState::Running {
            return self.turns_left;
        }
        self.turns_left = self.turns_left.saturating_sub(1);
        if self.turns_left == 0 {
            self.complete();
        }
        self.turns_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest(turns: u32) -> Activity {
        Activity::new(
            Behavior::Rest(RestBehavior),
            EntityId::PLAYER,
            ActivityKind::Rest.info(),
            turns,
        )
    }

    fn attack() -> Activity {
        Activity::new(
            Behavior::Attack(AttackBehavior),
            EntityId::PLAYER,
            ActivityKind::Attack.info(),
            1,
        )
        .with_target(EntityId(3))
    }

    #[test]
    fn new_activity_is_running_with_full_budget() {
        let activity = rest(4);
        assert_eq!(activity.state(), ActivityState::Running);
        assert_eq!(activity.turns_left(), 4);
        assert_eq!(activity.turns_total(), 4);
        assert_eq!(activity.progress_percent(), 0.0);
    }

    #[test]
    fn zero_duration_clamps_to_one() {
        let activity = rest(0);
        assert_eq!(activity.turns_total(), 1);
        assert_eq!(activity.turns_left(), 1);
    }

    #[test]
    fn complete_is_idempotent() {
        let mut activity = rest(3);
        activity.complete();
        activity.complete();
        assert!(activity.is_completed());
        assert_eq!(activity.turns_left(), 0);
        assert_eq!(activity.progress_percent(), 100.0);
    }

    #[test]
    fn advance_is_monotonic_and_reaches_full_progress() {
        let mut activity = rest(4);
        let mut last_left = activity.turns_left();
        let mut last_progress = activity.progress_percent();

        while activity.is_active() {
            activity.advance();
            assert!(activity.turns_left() <= last_left);
            assert!(activity.progress_percent() >= last_progress);
            last_left = activity.turns_left();
            last_progress = activity.progress_percent();
        }

        assert!(activity.is_completed());
        assert_eq!(activity.turns_left(), 0);
        assert_eq!(activity.progress_percent(), 100.0);
    }

    #[test]
    fn advance_ignores_paused_activity() {
        let mut activity = rest(3);
        activity.interrupt("ambush").unwrap();
        assert_eq!(activity.advance(), 3);
        assert!(activity.is_paused());
    }

    #[test]
    fn interrupt_then_resume_clears_reason() {
        let mut activity = rest(5);
        activity.interrupt("a noise").unwrap();
        assert!(activity.is_paused());
        assert_eq!(activity.cancel_reason(), Some("a noise"));
        assert!(activity.can_resume());

        activity.resume().unwrap();
        assert!(activity.is_active());
        assert_eq!(activity.cancel_reason(), None);
    }

    #[test]
    fn resume_requires_paused_state() {
        let mut activity = rest(5);
        let err = activity.resume().unwrap_err();
        assert_eq!(
            err,
            TransitionError::NotPaused {
                kind: ActivityKind::Rest,
                state: ActivityState::Running,
            }
        );
        assert!(activity.is_active());
    }

    #[test]
    fn non_interruptible_activity_refuses_interrupt() {
        let mut activity = attack();
        assert!(!activity.can_interrupt());
        assert_eq!(
            activity.interrupt("nope"),
            Err(TransitionError::NotInterruptible(ActivityKind::Attack))
        );
        assert!(activity.is_active());
    }

    #[test]
    fn cancel_is_unconditional_on_live_activities() {
        let mut running = attack();
        assert!(running.cancel("target fled"));
        assert!(running.is_canceled());
        assert_eq!(running.cancel_reason(), Some("target fled"));

        let mut paused = rest(2);
        paused.interrupt("door").unwrap();
        assert!(paused.cancel("gave up"));
        assert!(paused.is_canceled());
        assert!(!paused.can_resume());
    }

    #[test]
    fn cancel_leaves_completed_activity_alone() {
        let mut activity = rest(1);
        activity.complete();
        assert!(!activity.cancel("late"));
        assert!(activity.is_completed());
        assert_eq!(activity.turns_left(), 0);
    }
}
