//! Turns a roaming sub-state into the next action request.

use rand::Rng;
use rand::seq::SliceRandom;

use delve_core::{ActionRequest, AiConfig, Direction, GameState, Position, RoamingSubState};

use super::AiContext;

/// Chooses one request per call. Every branch falls back to a single-turn
/// wait when no step is legal.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionPlanner;

impl ActionPlanner {
    pub fn plan<R: Rng + ?Sized>(
        ctx: &AiContext,
        state: &GameState,
        config: &AiConfig,
        rng: &mut R,
    ) -> ActionRequest {
        let step = match ctx.roaming.sub_state {
            RoamingSubState::Chasing => Self::chase_step(ctx.position, ctx.target_position, state),
            RoamingSubState::Driving => Self::drive_step(ctx.position, state, config, rng),
            RoamingSubState::Waiting | RoamingSubState::Uninitialized => None,
        };

        match step {
            Some(destination) => ActionRequest::move_to(ctx.entity, destination),
            None => ActionRequest::wait(ctx.entity),
        }
    }

    /// Greedy steps towards `target`, best first: the diagonal that closes
    /// both axes, then the longer axis, then the shorter one.
    pub fn chase_candidates(from: Position, target: Position) -> Vec<Position> {
        let (dx, dy) = from.delta_to(target);
        let (sx, sy) = (dx.signum(), dy.signum());

        let mut steps = Vec::with_capacity(3);
        if sx != 0 && sy != 0 {
            steps.push((sx, sy));
        }
        if dx.abs() >= dy.abs() {
            steps.push((sx, 0));
            steps.push((0, sy));
        } else {
            steps.push((0, sy));
            steps.push((sx, 0));
        }

        steps
            .into_iter()
            .filter(|&step| step != (0, 0))
            .map(|(x, y)| Position::new(from.x + x, from.y + y))
            .collect()
    }

    fn chase_step(from: Position, target: Position, state: &GameState) -> Option<Position> {
        Self::chase_candidates(from, target)
            .into_iter()
            .find(|&candidate| state.can_enter(candidate))
    }

    fn drive_step<R: Rng + ?Sized>(
        from: Position,
        state: &GameState,
        config: &AiConfig,
        rng: &mut R,
    ) -> Option<Position> {
        if rng.gen_range(0..100) < config.drive_wait_percent {
            return None;
        }

        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        directions
            .into_iter()
            .map(|direction| from.offset(direction))
            .find(|&candidate| state.can_enter(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{
        ActivityKind, ActorState, ApPool, EntityId, Faction, PcgRng, RoamingState, WorldMap,
    };

    fn ctx(sub_state: RoamingSubState, position: Position, target: Position) -> AiContext {
        AiContext {
            entity: EntityId(1),
            position,
            ap: ApPool::full(100),
            roaming: RoamingState::new(sub_state, 1, 5),
            target: EntityId::PLAYER,
            target_position: target,
        }
    }

    fn open_room() -> GameState {
        GameState::new(WorldMap::bordered(12, 12), 100)
    }

    #[test]
    fn chase_candidates_prefer_diagonal_then_longer_axis() {
        let from = Position::new(5, 5);
        assert_eq!(
            ActionPlanner::chase_candidates(from, Position::new(8, 6)),
            vec![
                Position::new(6, 6),
                Position::new(6, 5),
                Position::new(5, 6)
            ]
        );
        assert_eq!(
            ActionPlanner::chase_candidates(from, Position::new(4, 1)),
            vec![
                Position::new(4, 4),
                Position::new(5, 4),
                Position::new(4, 5)
            ]
        );
    }

    #[test]
    fn chase_candidates_on_a_straight_line_have_one_step() {
        let from = Position::new(5, 5);
        assert_eq!(
            ActionPlanner::chase_candidates(from, Position::new(5, 9)),
            vec![Position::new(5, 6)]
        );
        assert!(ActionPlanner::chase_candidates(from, from).is_empty());
    }

    #[test]
    fn chasing_skips_blocked_candidates() {
        let mut state = open_room();
        state.world.add_wall(Position::new(6, 6));
        let request = ActionPlanner::plan(
            &ctx(RoamingSubState::Chasing, Position::new(5, 5), Position::new(8, 6)),
            &state,
            &AiConfig::default(),
            &mut PcgRng::new(1),
        );
        assert_eq!(request, ActionRequest::move_to(EntityId(1), Position::new(6, 5)));
    }

    #[test]
    fn chasing_waits_when_boxed_in_next_to_target() {
        let mut state = open_room();
        state
            .add_actor(ActorState::new(
                EntityId::PLAYER,
                "hero",
                Position::new(6, 5),
                Faction::Player,
            ))
            .unwrap();
        let request = ActionPlanner::plan(
            &ctx(RoamingSubState::Chasing, Position::new(5, 5), Position::new(6, 5)),
            &state,
            &AiConfig::default(),
            &mut PcgRng::new(1),
        );
        assert_eq!(request.kind, ActivityKind::Wait);
    }

    #[test]
    fn waiting_always_waits() {
        let state = open_room();
        let mut rng = PcgRng::new(3);
        for sub_state in [RoamingSubState::Waiting, RoamingSubState::Uninitialized] {
            let request = ActionPlanner::plan(
                &ctx(sub_state, Position::new(5, 5), Position::new(6, 6)),
                &state,
                &AiConfig::default(),
                &mut rng,
            );
            assert_eq!(request, ActionRequest::wait(EntityId(1)));
        }
    }

    #[test]
    fn driving_never_waits_when_idle_chance_is_zero() {
        let state = open_room();
        let config = AiConfig {
            drive_wait_percent: 0,
            ..AiConfig::default()
        };
        let from = Position::new(5, 5);
        let mut rng = PcgRng::new(11);
        for _ in 0..32 {
            let request = ActionPlanner::plan(
                &ctx(RoamingSubState::Driving, from, Position::new(1, 1)),
                &state,
                &config,
                &mut rng,
            );
            assert_eq!(request.kind, ActivityKind::Move);
            let destination = request.params.position.unwrap();
            assert!(from.is_adjacent(destination));
        }
    }

    #[test]
    fn driving_always_waits_when_idle_chance_is_certain() {
        let state = open_room();
        let config = AiConfig {
            drive_wait_percent: 100,
            ..AiConfig::default()
        };
        let request = ActionPlanner::plan(
            &ctx(RoamingSubState::Driving, Position::new(5, 5), Position::new(1, 1)),
            &state,
            &config,
            &mut PcgRng::new(5),
        );
        assert_eq!(request.kind, ActivityKind::Wait);
    }

    #[test]
    fn driving_picks_the_only_open_neighbour() {
        let mut state = open_room();
        let from = Position::new(5, 5);
        for direction in Direction::ALL {
            if direction != Direction::SouthWest {
                state.world.add_wall(from.offset(direction));
            }
        }
        let config = AiConfig {
            drive_wait_percent: 0,
            ..AiConfig::default()
        };
        let request = ActionPlanner::plan(
            &ctx(RoamingSubState::Driving, from, Position::new(1, 1)),
            &state,
            &config,
            &mut PcgRng::new(9),
        );
        assert_eq!(request, ActionRequest::move_to(EntityId(1), Position::new(4, 6)));
    }

    #[test]
    fn same_seed_plans_the_same_drive() {
        let state = open_room();
        let config = AiConfig::default();
        let plan = |seed| {
            let mut rng = PcgRng::new(seed);
            (0..16)
                .map(|_| {
                    ActionPlanner::plan(
                        &ctx(RoamingSubState::Driving, Position::new(5, 5), Position::new(1, 1)),
                        &state,
                        &config,
                        &mut rng,
                    )
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(plan(21), plan(21));
    }
}
