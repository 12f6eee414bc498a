//! Activity scheduling.
//!
//! The [`ActivityManager`] owns at most one [`Activity`] per actor. Activities
//! live in a registry-ordered arena with an actor → slot side table; terminal
//! entries are evicted only after a full processing pass, never mid-iteration.
//!
//! Every behavior error is wrapped in a [`PhaseError`] naming the hook it came
//! from. The manager never panics on game data: each failure either comes back
//! as an error or leaves a canceled activity behind.
mod errors;
mod report;

pub use errors::{LifecyclePhase, ManagerError, PhaseError};
pub use report::{ActivitySummary, ActivityTick, TickOutcome, TurnReport};

use std::collections::HashMap;

use crate::activity::{Activity, ActivityBehavior, ActivityState, TransitionError};
use crate::env::World;
use crate::state::EntityId;

/// Scheduler for the one-activity-per-actor registry.
#[derive(Clone, Debug, Default)]
pub struct ActivityManager {
    slots: Vec<Activity>,
    index: HashMap<EntityId, usize>,
}

impl ActivityManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_activity(&self, actor: EntityId) -> Option<&Activity> {
        self.index.get(&actor).and_then(|&slot| self.slots.get(slot))
    }

    pub fn has_activity(&self, actor: EntityId) -> bool {
        self.index.contains_key(&actor)
    }

    /// True while the actor's activity is running; a paused one does not count.
    pub fn is_busy(&self, actor: EntityId) -> bool {
        self.current_activity(actor)
            .is_some_and(|activity| activity.is_active())
    }

    /// Registered activities in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registers `activity`, replacing whatever the actor was doing.
    ///
    /// The actor's current activity is interrupted first. When it refuses the
    /// interrupt the replacement still happens: the old activity is canceled
    /// instead and its `canceled` hook runs. On success the replaced activity
    /// is handed back.
    ///
    /// If the new activity then fails `validate` or `start`, it is not left
    /// registered. A paused predecessor stays in the actor's slot, still
    /// paused; a canceled one is dropped.
    pub fn start_activity(
        &mut self,
        activity: Activity,
        world: &mut World<'_>,
    ) -> Result<Option<Activity>, ManagerError> {
        let behavior = activity.behavior();
        let kind = activity.kind();
        let actor = activity.actor();
        let turns = activity.turns_total();

        if let Some(&slot) = self.index.get(&actor) {
            Self::displace(&mut self.slots[slot], kind, world);
        }

        if let Err(error) = behavior.validate(&activity, world) {
            self.discard_canceled(actor);
            return Err(PhaseError::new(LifecyclePhase::Validate, kind, error).into());
        }

        let displaced = self.register(activity);
        let slot = self.slot(actor)?;
        if let Err(error) = behavior.start(&mut self.slots[slot], world) {
            match displaced {
                Some(previous) if previous.is_paused() => self.slots[slot] = previous,
                _ => {
                    self.evict(actor);
                }
            }
            return Err(PhaseError::new(LifecyclePhase::Start, kind, error).into());
        }

        tracing::info!(%actor, %kind, turns, "activity started");
        Ok(displaced)
    }

    /// Pauses the actor's activity.
    pub fn interrupt_activity(
        &mut self,
        actor: EntityId,
        reason: impl Into<String>,
    ) -> Result<(), ManagerError> {
        let slot = self.slot(actor)?;
        let activity = &mut self.slots[slot];
        activity.interrupt(reason)?;

        tracing::debug!(%actor, kind = %activity.kind(), "activity interrupted");
        Ok(())
    }

    /// Resumes a paused activity after re-running its validation.
    pub fn resume_activity(
        &mut self,
        actor: EntityId,
        world: &mut World<'_>,
    ) -> Result<(), ManagerError> {
        let slot = self.slot(actor)?;
        let activity = &mut self.slots[slot];
        activity.ensure_resumable()?;

        let kind = activity.kind();
        activity
            .behavior()
            .validate(activity, world)
            .map_err(|error| PhaseError::new(LifecyclePhase::Validate, kind, error))?;
        activity.resume()?;

        tracing::debug!(%actor, %kind, "activity resumed");
        Ok(())
    }

    /// Cancels and deregisters the actor's activity, running its `canceled` hook.
    ///
    /// Returns the canceled activity, or `None` when the actor had none.
    pub fn cancel_activity(
        &mut self,
        actor: EntityId,
        reason: impl Into<String>,
        world: &mut World<'_>,
    ) -> Option<Activity> {
        let mut activity = self.evict(actor)?;
        if activity.cancel(reason) {
            activity.behavior().canceled(&activity, world);
            tracing::info!(%actor, kind = %activity.kind(), "activity canceled");
        }
        Some(activity)
    }

    /// Advances every running activity by one turn, then evicts terminal ones.
    pub fn process_turn(&mut self, world: &mut World<'_>) -> TurnReport {
        let mut report = TurnReport::default();
        for slot in 0..self.slots.len() {
            self.process_slot(slot, world, &mut report);
        }
        self.evict_terminal();
        report
    }

    /// Advances only `actor`'s activity, leaving every other actor untouched.
    pub fn process_actor(&mut self, actor: EntityId, world: &mut World<'_>) -> TurnReport {
        let mut report = TurnReport::default();
        if let Some(&slot) = self.index.get(&actor) {
            self.process_slot(slot, world, &mut report);
            self.evict_terminal();
        }
        report
    }

    pub fn summary(&self) -> ActivitySummary {
        let mut summary = ActivitySummary::default();
        for activity in &self.slots {
            match activity.state() {
                ActivityState::Running => summary.running += 1,
                ActivityState::Paused => summary.paused += 1,
                ActivityState::Completed => summary.completed += 1,
                ActivityState::Canceled => summary.canceled += 1,
            }
        }
        summary
    }

    fn process_slot(&mut self, slot: usize, world: &mut World<'_>, report: &mut TurnReport) {
        let Some(activity) = self.slots.get_mut(slot) else {
            return;
        };
        match activity.state() {
            ActivityState::Running => {}
            ActivityState::Paused => return,
            ActivityState::Completed | ActivityState::Canceled => {
                tracing::debug!(actor = %activity.actor(), "evicting stale terminal activity");
                return;
            }
        }

        let behavior = activity.behavior();
        let kind = activity.kind();
        let actor = activity.actor();

        let outcome = match behavior.do_turn(activity, world) {
            Err(error) => {
                let error = PhaseError::new(LifecyclePhase::Turn, kind, error);
                activity.cancel(error.to_string());
                behavior.canceled(activity, world);
                tracing::info!(%actor, %error, "activity canceled");
                TickOutcome::Canceled {
                    reason: error.to_string(),
                }
            }
            Ok(()) if activity.is_completed() => {
                if let Err(error) = behavior.finish(activity, world) {
                    let error = PhaseError::new(LifecyclePhase::Finish, kind, error);
                    tracing::warn!(%actor, %error, "finish hook failed");
                }
                tracing::info!(%actor, %kind, "activity completed");
                TickOutcome::Completed
            }
            Ok(()) if activity.is_canceled() => {
                behavior.canceled(activity, world);
                let reason = activity.cancel_reason().unwrap_or_default().to_string();
                tracing::info!(%actor, %kind, %reason, "activity canceled itself");
                TickOutcome::Canceled { reason }
            }
            Ok(()) => TickOutcome::Continuing,
        };

        report.ticks.push(ActivityTick {
            actor,
            kind,
            ap_cost: activity.info().ap_cost,
            outcome,
        });
    }

    /// Interrupts (or, failing that, cancels) an activity being replaced.
    fn displace(previous: &mut Activity, by: crate::activity::ActivityKind, world: &mut World<'_>) {
        if previous.state() != ActivityState::Running {
            return;
        }
        let reason = format!("replaced by {by}");
        if let Err(refusal) = previous.interrupt(reason.clone()) {
            tracing::warn!(
                actor = %previous.actor(),
                kind = %previous.kind(),
                %refusal,
                "interrupt refused; replacing anyway"
            );
            previous.cancel(reason);
            previous.behavior().canceled(previous, world);
        }
    }

    /// Drops the actor's activity if displacing it canceled it.
    fn discard_canceled(&mut self, actor: EntityId) {
        if self
            .current_activity(actor)
            .is_some_and(|activity| activity.is_canceled())
        {
            self.evict(actor);
        }
    }

    fn slot(&self, actor: EntityId) -> Result<usize, TransitionError> {
        self.index
            .get(&actor)
            .copied()
            .ok_or(TransitionError::NoActivity(actor))
    }

    /// Places `activity` in its actor's slot, returning the previous occupant.
    fn register(&mut self, activity: Activity) -> Option<Activity> {
        match self.index.get(&activity.actor()) {
            Some(&slot) => Some(std::mem::replace(&mut self.slots[slot], activity)),
            None => {
                self.index.insert(activity.actor(), self.slots.len());
                self.slots.push(activity);
                None
            }
        }
    }

    fn evict(&mut self, actor: EntityId) -> Option<Activity> {
        let slot = self.index.remove(&actor)?;
        let activity = self.slots.remove(slot);
        self.reindex();
        Some(activity)
    }

    fn evict_terminal(&mut self) {
        let before = self.slots.len();
        self.slots.retain(|activity| !activity.state().is_terminal());
        if self.slots.len() != before {
            self.reindex();
        }
    }

    fn reindex(&mut self) {
        self.index = self
            .slots
            .iter()
            .enumerate()
            .map(|(slot, activity)| (activity.actor(), slot))
            .collect();
    }
}
