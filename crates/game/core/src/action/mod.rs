//! Action API: the single entry point for actor requests.
//!
//! [`ActionApi::execute`] turns an [`ActionRequest`] into an [`Activity`],
//! sizes its duration from the actor's AP, and registers it with the
//! [`ActivityManager`]. One-turn activities resolve on the spot and are paid
//! for immediately; multi-turn activities are paid for turn by turn as
//! [`ActionApi::advance_turn`] ticks them.
mod error;
mod request;

pub use error::ActionApiError;
pub use request::{ActionOutcome, ActionParams, ActionRequest, ActionResult};

use crate::activity::{Activity, ActivityError, ActivityKind, Behavior, calculate_required_turns};
use crate::engine::{ActivityManager, LifecyclePhase, ManagerError, PhaseError, TickOutcome, TurnReport};
use crate::env::World;
use crate::state::{ApLedger, EntityId};

/// Facade unifying instant and continuous requests over an [`ActivityManager`].
#[derive(Clone, Debug, Default)]
pub struct ActionApi {
    manager: ActivityManager,
}

impl ActionApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manager(manager: ActivityManager) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &ActivityManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ActivityManager {
        &mut self.manager
    }

    /// Builds, registers and (for one-turn activities) resolves a request.
    ///
    /// Rejected requests are narrated and returned as errors; the new activity
    /// is not registered and no AP is spent. Whatever the actor was doing has
    /// already been interrupted by then and stays paused. An instant action that fails while
    /// resolving is reported as [`ActionOutcome::Canceled`].
    pub fn execute(
        &mut self,
        request: ActionRequest,
        world: &mut World<'_>,
    ) -> Result<ActionResult, ActionApiError> {
        let activity = match Self::build(&request, world) {
            Ok(activity) => activity,
            Err(error) => {
                Self::narrate_rejection(request.kind, &error, world);
                return Err(error);
            }
        };
        let turns = activity.turns_total();

        if let Err(error) = self.manager.start_activity(activity, world) {
            let error = ActionApiError::from(error);
            Self::narrate_rejection(request.kind, &error, world);
            return Err(error);
        }

        let mut result = ActionResult {
            actor: request.actor,
            kind: request.kind,
            outcome: ActionOutcome::Started { turns },
            ap_spent: 0,
        };
        if turns > 1 {
            return Ok(result);
        }

        let report = self.manager.process_actor(request.actor, world);
        match report.for_actor(request.actor).map(|tick| &tick.outcome) {
            Some(TickOutcome::Completed) => {
                result.outcome = ActionOutcome::Completed;
                result.ap_spent = self.consume_move_cost(request.actor, request.kind, world);
            }
            Some(TickOutcome::Canceled { reason }) => {
                result.outcome = ActionOutcome::Canceled {
                    reason: reason.clone(),
                };
            }
            Some(TickOutcome::Continuing) | None => {}
        }
        Ok(result)
    }

    /// Debits the per-turn AP cost of `kind` for `actor`.
    ///
    /// The player pays from the ledger's move points; AI actors pay from their
    /// own pool. A failed AI debit is logged and spends nothing. Returns the
    /// amount withdrawn.
    pub fn consume_move_cost(
        &self,
        actor: EntityId,
        kind: ActivityKind,
        world: &mut World<'_>,
    ) -> u32 {
        let cost = world.env.activity_info(kind).ap_cost;
        Self::debit(actor, cost, world)
    }

    /// Runs one manager pass and charges every activity that consumed a turn.
    pub fn advance_turn(&mut self, world: &mut World<'_>) -> TurnReport {
        let report = self.manager.process_turn(world);
        for tick in report.ticks.iter().filter(|tick| tick.consumed_turn()) {
            Self::debit(tick.actor, tick.ap_cost, world);
        }
        report
    }

    fn build(request: &ActionRequest, world: &World<'_>) -> Result<Activity, ActionApiError> {
        let actor = world
            .state
            .entities
            .actor(request.actor)
            .ok_or(ActionApiError::UnknownActor(request.actor))?;

        let kind = request.kind;
        let params = &request.params;
        let info = world.env.activity_info(kind);
        if info.requires_target && params.target.is_none() {
            return Err(ActionApiError::MissingParameter {
                kind,
                parameter: "target",
            });
        }
        if info.requires_position && params.position.is_none() {
            return Err(ActionApiError::MissingParameter {
                kind,
                parameter: "position",
            });
        }

        let behavior = Behavior::for_kind(kind, params.item, params.recipe)
            .map_err(|error| Self::rejected(kind, error))?;

        let actor_ap = actor.max_ap().unwrap_or(world.config().default_actor_ap);
        let turns = params
            .turns
            .unwrap_or_else(|| calculate_required_turns(&info, actor_ap));

        let mut activity = Activity::new(behavior, request.actor, info, turns);
        if let Some(target) = params.target {
            activity = activity.with_target(target);
        }
        if let Some(position) = params.position {
            activity = activity.with_position(position);
        }
        Ok(activity)
    }

    fn rejected(kind: ActivityKind, error: ActivityError) -> ActionApiError {
        ManagerError::from(PhaseError::new(LifecyclePhase::Validate, kind, error)).into()
    }

    fn narrate_rejection(kind: ActivityKind, error: &ActionApiError, world: &mut World<'_>) {
        let name = world.env.activity_info(kind).name;
        let reason = match error {
            ActionApiError::Manager(ManagerError::Phase(phase)) => phase.error.to_string(),
            other => other.to_string(),
        };
        world.narrate(format!("Cannot {name}: {reason}."));
    }

    fn debit(actor: EntityId, cost: u32, world: &mut World<'_>) -> u32 {
        if actor.is_player() {
            world.state.debit_player_moves(cost);
            return cost;
        }
        if world.state.debit_actor_ap(actor, cost) {
            cost
        } else {
            tracing::warn!(%actor, cost, "AP debit failed; treating as no-op");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::GameEnv;
    use crate::state::{ActorState, Faction, GameState, Position, WorldMap};

    const GOBLIN: EntityId = EntityId(1);

    fn state() -> GameState {
        let mut state = GameState::new(WorldMap::bordered(10, 10), 100);
        state
            .add_actor(ActorState::new(
                EntityId::PLAYER,
                "hero",
                Position::new(2, 2),
                Faction::Player,
            ))
            .unwrap();
        state
            .add_actor(
                ActorState::new(GOBLIN, "goblin", Position::new(6, 6), Faction::Hostile)
                    .with_ap(150),
            )
            .unwrap();
        state
    }

    #[test]
    fn instant_move_resolves_and_debits_player_moves() {
        let config = GameConfig::default();
        let mut state = state();
        let mut world = World::new(&mut state, GameEnv::new(&config));
        let mut api = ActionApi::new();

        let result = api
            .execute(
                ActionRequest::move_to(EntityId::PLAYER, Position::new(3, 2)),
                &mut world,
            )
            .unwrap();

        assert_eq!(result.outcome, ActionOutcome::Completed);
        assert_eq!(result.ap_spent, 100);
        assert_eq!(world.state.turn.player_moves, 0);
        assert_eq!(
            world.state.entities.actor(EntityId::PLAYER).unwrap().position,
            Position::new(3, 2)
        );
        assert!(api.manager().is_empty());
    }

    #[test]
    fn continuous_rest_starts_without_spending() {
        let config = GameConfig::default();
        let mut state = state();
        let mut world = World::new(&mut state, GameEnv::new(&config));
        let mut api = ActionApi::new();

        let result = api
            .execute(ActionRequest::rest(EntityId::PLAYER), &mut world)
            .unwrap();

        assert_eq!(result.outcome, ActionOutcome::Started { turns: 10 });
        assert_eq!(result.ap_spent, 0);
        assert_eq!(world.state.turn.player_moves, 100);
    }

    #[test]
    fn ai_actor_duration_uses_its_own_pool() {
        let config = GameConfig::default();
        let mut state = state();
        let mut world = World::new(&mut state, GameEnv::new(&config));
        let mut api = ActionApi::new();

        let result = api.execute(ActionRequest::rest(GOBLIN), &mut world).unwrap();
        assert_eq!(result.outcome, ActionOutcome::Started { turns: 7 });

        api.advance_turn(&mut world);
        assert_eq!(world.state.entities.actor(GOBLIN).unwrap().ap.unwrap().current, 50);
    }

    #[test]
    fn failed_ai_debit_is_a_noop() {
        let config = GameConfig::default();
        let mut state = state();
        state
            .entities
            .actor_mut(GOBLIN)
            .unwrap()
            .ap
            .as_mut()
            .unwrap()
            .current = 10;
        let mut world = World::new(&mut state, GameEnv::new(&config));
        let mut api = ActionApi::new();

        let result = api
            .execute(ActionRequest::move_to(GOBLIN, Position::new(5, 5)), &mut world)
            .unwrap();
        assert!(result.is_success());
        assert_eq!(result.ap_spent, 0);
        assert_eq!(world.state.entities.actor(GOBLIN).unwrap().ap.unwrap().current, 10);
    }

    #[test]
    fn instant_action_does_not_advance_other_activities() {
        let config = GameConfig::default();
        let mut state = state();
        let mut world = World::new(&mut state, GameEnv::new(&config));
        let mut api = ActionApi::new();

        api.execute(ActionRequest::wait_for(GOBLIN, 3), &mut world)
            .unwrap();
        api.execute(ActionRequest::wait(EntityId::PLAYER), &mut world)
            .unwrap();

        assert_eq!(api.manager().current_activity(GOBLIN).unwrap().turns_left(), 3);
    }

    #[test]
    fn rejected_request_is_narrated_and_not_registered() {
        let config = GameConfig::default();
        let mut state = state();
        let mut log: Vec<String> = Vec::new();
        let mut world = World::new(&mut state, GameEnv::new(&config)).with_narrator(&mut log);
        let mut api = ActionApi::new();

        let err = api
            .execute(ActionRequest::attack(EntityId::PLAYER, GOBLIN), &mut world)
            .unwrap_err();
        assert!(matches!(err, ActionApiError::Manager(_)));
        assert!(api.manager().is_empty());
        assert_eq!(world.state.turn.player_moves, 100);

        drop(world);
        assert_eq!(log.len(), 1);
        assert!(log[0].starts_with("Cannot attack:"), "{}", log[0]);
    }

    #[test]
    fn refused_replacement_leaves_rest_paused() {
        let config = GameConfig::default();
        let mut state = state();
        let mut world = World::new(&mut state, GameEnv::new(&config));
        let mut api = ActionApi::new();

        api.execute(ActionRequest::rest(EntityId::PLAYER), &mut world)
            .unwrap();
        api.execute(ActionRequest::attack(EntityId::PLAYER, GOBLIN), &mut world)
            .unwrap_err();

        let rest = api.manager().current_activity(EntityId::PLAYER).unwrap();
        assert_eq!(rest.kind(), ActivityKind::Rest);
        assert!(rest.is_paused());
        assert!(api.advance_turn(&mut world).is_empty());
    }

    #[test]
    fn missing_mandatory_parameter_is_rejected() {
        let config = GameConfig::default();
        let mut state = state();
        let mut world = World::new(&mut state, GameEnv::new(&config));
        let mut api = ActionApi::new();

        let err = api
            .execute(
                ActionRequest::new(ActivityKind::Move, EntityId::PLAYER),
                &mut world,
            )
            .unwrap_err();
        assert_eq!(
            err,
            ActionApiError::MissingParameter {
                kind: ActivityKind::Move,
                parameter: "position",
            }
        );
    }

    #[test]
    fn unknown_actor_is_rejected() {
        let config = GameConfig::default();
        let mut state = state();
        let mut world = World::new(&mut state, GameEnv::new(&config));
        let mut api = ActionApi::new();

        assert_eq!(
            api.execute(ActionRequest::rest(EntityId(77)), &mut world),
            Err(ActionApiError::UnknownActor(EntityId(77)))
        );
    }
}
