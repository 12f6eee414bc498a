//! AI phase driver.
//!
//! [`AiProcessor`] walks every non-player actor once per game turn. A failure
//! for one actor is logged and recorded in the [`AiTurnReport`]; it never stops
//! the other actors from acting.

use rand::Rng;
use tracing::{debug, warn};

use delve_core::{ActionApi, ActionOutcome, EntityId, GameError, RoamingSubState, World};

use super::{ActionPlanner, AiContext, SkipReason, update_state, vision};

/// Why an actor's action loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    /// The next planned request cost more AP than remained.
    InsufficientAp,
    /// The Action API refused the request.
    Rejected,
    /// The request resolved but did not succeed.
    Unsuccessful,
    /// A multi-turn activity was started and now owns the actor.
    Committed,
    /// Hit the per-turn action cap.
    ActionCap,
}

/// What one actor did during the AI phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiOutcome {
    Acted {
        sub_state: RoamingSubState,
        actions: u32,
        stopped: StopReason,
    },
    Skipped(SkipReason),
}

/// Per-actor results of one AI phase, in processing order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AiTurnReport {
    pub entries: Vec<(EntityId, AiOutcome)>,
}

impl AiTurnReport {
    pub fn outcome(&self, entity: EntityId) -> Option<&AiOutcome> {
        self.entries
            .iter()
            .find(|(id, _)| *id == entity)
            .map(|(_, outcome)| outcome)
    }

    /// Successful actions taken by `entity`; zero when it was skipped.
    pub fn actions_for(&self, entity: EntityId) -> u32 {
        match self.outcome(entity) {
            Some(AiOutcome::Acted { actions, .. }) => *actions,
            _ => 0,
        }
    }

    pub fn total_actions(&self) -> u32 {
        self.entries
            .iter()
            .map(|(id, _)| self.actions_for(*id))
            .sum()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (EntityId, SkipReason)> + '_ {
        self.entries.iter().filter_map(|(id, outcome)| match outcome {
            AiOutcome::Skipped(reason) => Some((*id, *reason)),
            AiOutcome::Acted { .. } => None,
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AiProcessor;

impl AiProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Runs the AI phase for every non-player actor.
    pub fn process_turn<R: Rng + ?Sized>(
        &self,
        world: &mut World<'_>,
        api: &mut ActionApi,
        rng: &mut R,
    ) -> AiTurnReport {
        let mut report = AiTurnReport::default();
        for entity in world.state.entities.npc_ids() {
            let outcome = match self.process_entity(entity, world, api, rng) {
                Ok(outcome) => outcome,
                Err(reason) => {
                    if reason != SkipReason::NotAiControlled {
                        warn!(%entity, %reason, "skipping AI actor");
                    }
                    AiOutcome::Skipped(reason)
                }
            };
            report.entries.push((entity, outcome));
        }
        report
    }

    fn process_entity<R: Rng + ?Sized>(
        &self,
        entity: EntityId,
        world: &mut World<'_>,
        api: &mut ActionApi,
        rng: &mut R,
    ) -> Result<AiOutcome, SkipReason> {
        let config = world.config();
        let ctx = AiContext::gather(world.state, entity)?;

        let sees_target = vision::can_see_target(world.state, entity, ctx.target, &config.vision);
        let mut roaming = ctx.roaming;
        let turn = world.turn_number();
        if let Some(change) = update_state(&mut roaming, sees_target, turn, &config.ai, rng) {
            debug!(%entity, turn, from = %change.from, to = %change.to, "roaming transition");
        }
        let actor = world
            .state
            .entities
            .actor_mut(entity)
            .ok_or(SkipReason::MissingActor)?;
        actor.roaming = Some(roaming);

        let mut actions = 0;
        let stopped = loop {
            if actions >= config.ai.max_actions_per_turn {
                break StopReason::ActionCap;
            }

            let ctx = AiContext::gather(world.state, entity)?;
            let request = ActionPlanner::plan(&ctx, world.state, &config.ai, rng);
            let cost = world.env.activity_info(request.kind).ap_cost;
            if !ctx.can_afford(cost) {
                debug!(
                    %entity,
                    kind = %request.kind,
                    cost,
                    available = ctx.ap.current,
                    "not enough AP for next action"
                );
                break StopReason::InsufficientAp;
            }

            match api.execute(request, world) {
                Err(error) => {
                    let severity = error.severity();
                    let code = error.error_code();
                    if severity.is_internal() {
                        warn!(
                            %entity,
                            kind = %request.kind,
                            %error,
                            code,
                            %severity,
                            "AI request failed"
                        );
                    } else {
                        debug!(%entity, kind = %request.kind, %error, code, "AI request rejected");
                    }
                    break StopReason::Rejected;
                }
                Ok(result) if !result.is_success() => break StopReason::Unsuccessful,
                Ok(result) => {
                    actions += 1;
                    if matches!(result.outcome, ActionOutcome::Started { .. }) {
                        break StopReason::Committed;
                    }
                }
            }
        };
        debug!(%entity, sub_state = %roaming.sub_state, actions, %stopped, "AI actor done");

        Ok(AiOutcome::Acted {
            sub_state: roaming.sub_state,
            actions,
            stopped,
        })
    }
}
