//! Turn runner.
//!
//! A game turn runs in three phases against the Turn Ledger: the player's
//! phase (spend move points on requests), the AI phase (refill AI pools and
//! let every roaming actor act), and the turn end (advance continuous
//! activities, bump the turn number, refill the player's moves).

use tracing::{debug, info, warn};

use delve_core::{
    ActionApi, ActionRequest, ActionResult, ActivityManager, EntityId, GameError, PcgRng,
    TurnReport, World,
};

use crate::api::{Result, RuntimeError};
use crate::providers::ai::{AiProcessor, AiTurnReport};

/// Everything that happened during one [`TurnRunner::play_turn`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnSummary {
    /// Turn number that was played.
    pub turn: u64,
    pub player: Option<ActionResult>,
    pub ai: AiTurnReport,
    pub activities: TurnReport,
}

/// Owns the activity scheduler, the AI and the random stream for a session.
#[derive(Clone, Debug)]
pub struct TurnRunner {
    api: ActionApi,
    ai: AiProcessor,
    rng: PcgRng,
}

impl TurnRunner {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(PcgRng::new(seed))
    }

    pub fn with_rng(rng: PcgRng) -> Self {
        Self {
            api: ActionApi::new(),
            ai: AiProcessor::new(),
            rng,
        }
    }

    pub fn api(&self) -> &ActionApi {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut ActionApi {
        &mut self.api
    }

    pub fn manager(&self) -> &ActivityManager {
        self.api.manager()
    }

    /// Executes a player request during the player's phase.
    ///
    /// # Errors
    ///
    /// Refuses requests for other actors, requests made without a living
    /// player, and requests the ledger cannot pay for. Rejections from the
    /// Action API are passed through.
    pub fn player_action(
        &mut self,
        request: ActionRequest,
        world: &mut World<'_>,
    ) -> Result<ActionResult> {
        if !request.actor.is_player() {
            return Err(RuntimeError::InvalidActionActor {
                expected: EntityId::PLAYER,
                provided: request.actor,
            });
        }
        if world.state.entities.living_player().is_none() {
            return Err(RuntimeError::NoPlayer);
        }

        let required = world.env.activity_info(request.kind).ap_cost;
        let ledger = &world.state.turn;
        if !ledger.player_can_afford(required) {
            return Err(RuntimeError::InsufficientMoves {
                required,
                available: ledger.player_moves,
            });
        }

        Ok(self.api.execute(request, world)?)
    }

    /// Switches the ledger to the AI phase and lets every AI actor act.
    pub fn run_ai_phase(&mut self, world: &mut World<'_>) -> AiTurnReport {
        world.state.turn.begin_ai_turn();
        world.state.refill_actor_ap();

        let report = self.ai.process_turn(world, &mut self.api, &mut self.rng);
        debug!(
            turn = world.turn_number(),
            actions = report.total_actions(),
            skipped = report.skipped().count(),
            "AI phase finished"
        );
        report
    }

    /// Advances continuous activities and opens the next turn.
    pub fn end_turn(&mut self, world: &mut World<'_>) -> TurnReport {
        let report = self.api.advance_turn(world);

        let turn = world.state.turn.end_turn();
        let moves = world.config().player_moves_per_turn;
        world.state.turn.begin_player_turn(moves);
        debug!(turn, ticked = report.ticks.len(), "turn ended");
        report
    }

    /// Plays one full turn: the optional player request, the AI phase and the
    /// turn end.
    ///
    /// # Errors
    ///
    /// A refused player request aborts the call before the AI phase, leaving
    /// the ledger in the player's phase so the caller can choose again.
    pub fn play_turn(
        &mut self,
        request: Option<ActionRequest>,
        world: &mut World<'_>,
    ) -> Result<TurnSummary> {
        let turn = world.turn_number();
        let player = request
            .map(|request| self.player_action(request, world))
            .transpose()
            .inspect_err(|error| {
                let severity = error.severity();
                let code = error.error_code();
                if error.is_recoverable() {
                    debug!(turn, %error, code, %severity, "player request refused");
                } else {
                    warn!(turn, %error, code, %severity, "player request failed");
                }
            })?;
        let ai = self.run_ai_phase(world);
        let activities = self.end_turn(world);

        info!(
            turn,
            player_acted = player.is_some(),
            ai_actions = ai.total_actions(),
            "turn played"
        );
        Ok(TurnSummary {
            turn,
            player,
            ai,
            activities,
        })
    }
}
