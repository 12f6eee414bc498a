//! Per-actor snapshot the AI decides from.
//!
//! [`AiContext`] is the "blackboard" for one actor's AI turn. It copies the
//! handful of facts the state machine and planner read, so the world can be
//! mutated by executed actions between planning steps and the context simply
//! re-gathered.

use delve_core::{ApPool, EntityId, GameState, Position, RoamingState};

/// Why an actor sat out the AI phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("actor not found")]
    MissingActor,

    #[error("actor is dead")]
    Dead,

    #[error("actor has no roaming state")]
    NotAiControlled,

    #[error("actor has no AP pool")]
    NoApPool,

    #[error("no living player to track")]
    NoPlayer,
}

/// Facts about one AI actor and the player it tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiContext {
    /// The entity making the decision.
    pub entity: EntityId,
    pub position: Position,
    pub ap: ApPool,
    pub roaming: RoamingState,
    /// The living player.
    pub target: EntityId,
    pub target_position: Position,
}

impl AiContext {
    /// Collects the context for `entity`.
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] for the first piece of required data that is
    /// missing.
    pub fn gather(state: &GameState, entity: EntityId) -> Result<Self, SkipReason> {
        let actor = state
            .entities
            .actor(entity)
            .ok_or(SkipReason::MissingActor)?;
        if !actor.is_alive() {
            return Err(SkipReason::Dead);
        }
        let roaming = actor.roaming.ok_or(SkipReason::NotAiControlled)?;
        let ap = actor.ap.ok_or(SkipReason::NoApPool)?;
        let player = state
            .entities
            .living_player()
            .ok_or(SkipReason::NoPlayer)?;

        Ok(Self {
            entity,
            position: actor.position,
            ap,
            roaming,
            target: player.id,
            target_position: player.position,
        })
    }

    /// Whether the actor can pay `cost` from its remaining AP.
    pub fn can_afford(&self, cost: u32) -> bool {
        self.ap.can_afford(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{ActorState, Faction, ResourceMeter, RoamingSubState, WorldMap};

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
    }

    #[test]
    fn gathers_actor_and_player_facts() {
        let mut state = state();
        state
            .add_actor(
                ActorState::new(EntityId(1), "rat", Position::new(5, 5), Faction::Hostile)
                    .with_ap(100)
                    .with_roaming(RoamingState::new(RoamingSubState::Waiting, 1, 3)),
            )
            .unwrap();

        let ctx = AiContext::gather(&state, EntityId(1)).unwrap();
        assert_eq!(ctx.position, Position::new(5, 5));
        assert_eq!(ctx.target, EntityId::PLAYER);
        assert_eq!(ctx.target_position, Position::new(2, 2));
        assert!(ctx.can_afford(100));
        assert!(!ctx.can_afford(101));
    }

    #[test]
    fn missing_data_maps_to_skip_reasons() {
        let mut state = state();
        state
            .add_actor(ActorState::new(
                EntityId(1),
                "statue",
                Position::new(5, 5),
                Faction::Neutral,
            ))
            .unwrap();
        state
            .add_actor(
                ActorState::new(EntityId(2), "bat", Position::new(6, 6), Faction::Hostile)
                    .with_roaming(RoamingState::default()),
            )
            .unwrap();
        state
            .add_actor(
                ActorState::new(EntityId(3), "ghoul", Position::new(7, 7), Faction::Hostile)
                    .with_hp(ResourceMeter::new(0, 10))
                    .with_ap(100)
                    .with_roaming(RoamingState::default()),
            )
            .unwrap();

        assert_eq!(
            AiContext::gather(&state, EntityId(1)),
            Err(SkipReason::NotAiControlled)
        );
        assert_eq!(AiContext::gather(&state, EntityId(2)), Err(SkipReason::NoApPool));
        assert_eq!(AiContext::gather(&state, EntityId(3)), Err(SkipReason::Dead));
        assert_eq!(
            AiContext::gather(&state, EntityId(9)),
            Err(SkipReason::MissingActor)
        );
    }

    #[test]
    fn dead_player_skips_everyone() {
        let mut state = state();
        state
            .add_actor(
                ActorState::new(EntityId(1), "rat", Position::new(5, 5), Faction::Hostile)
                    .with_ap(100)
                    .with_roaming(RoamingState::default()),
            )
            .unwrap();
        state
            .entities
            .actor_mut(EntityId::PLAYER)
            .unwrap()
            .hp
            .current = 0;

        assert_eq!(AiContext::gather(&state, EntityId(1)), Err(SkipReason::NoPlayer));
    }
}
