use super::{ActivityBehavior, actor_mut, actor_name, living_actor};
use crate::activity::{Activity, ActivityError, ActivityKind};
use crate::env::World;

/// Multi-turn recovery. Refused, and aborted mid-way, while a hostile actor
/// stands within the configured radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RestBehavior;

impl ActivityBehavior for RestBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Rest
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        let actor = living_actor(world, activity.actor())?;
        let radius = world.config().rest_enemy_radius;

        match world.state.hostiles_near(actor, radius) {
            0 => Ok(()),
            count => Err(ActivityError::EnemiesNearby { count }),
        }
    }

    fn start(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        let name = actor_name(world, activity.actor());
        world.narrate(format!("{name} settles down to rest."));
        Ok(())
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        self.validate(activity, world)?;

        let heal = world.config().rest_heal_per_turn;
        actor_mut(world, activity.actor())?.hp.restore(heal);
        activity.advance();
        Ok(())
    }

    fn finish(&self, activity: &Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        let name = actor_name(world, activity.actor());
        world.narrate(format!("{name} feels rested."));
        Ok(())
    }
}

/// Passes turns without doing anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaitBehavior;

impl ActivityBehavior for WaitBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Wait
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        living_actor(world, activity.actor()).map(|_| ())
    }

    fn do_turn(&self, activity: &mut Activity, _world: &mut World<'_>) -> Result<(), ActivityError> {
        activity.advance();
        Ok(())
    }

    fn canceled(&self, activity: &Activity, world: &mut World<'_>) {
        // Nothing was in progress worth reporting for a one-turn pause.
        if activity.turns_total() > 1 {
            super::narrate_canceled(activity, world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::GameEnv;
    use crate::state::{
        ActorState, EntityId, Faction, GameState, Position, ResourceMeter, WorldMap,
    };

    fn camp(enemy_at: Option<Position>) -> GameState {
        let mut state = GameState::new(WorldMap::bordered(10, 10), 100);
        state
            .add_actor(
                ActorState::new(EntityId::PLAYER, "hero", Position::new(4, 4), Faction::Player)
                    .with_hp(ResourceMeter::new(3, 10)),
            )
            .unwrap();
        if let Some(position) = enemy_at {
            state
                .add_actor(ActorState::new(EntityId(1), "goblin", position, Faction::Hostile))
                .unwrap();
        }
        state
    }

    fn rest() -> Activity {
        Activity::new(RestBehavior.into(), EntityId::PLAYER, ActivityKind::Rest.info(), 3)
    }

    #[test]
    fn enemy_inside_three_by_three_blocks_rest() {
        let config = GameConfig::default();
        let mut state = camp(Some(Position::new(5, 5)));
        let world = World::new(&mut state, GameEnv::new(&config));

        let err = RestBehavior.validate(&rest(), &world).unwrap_err();
        assert_eq!(err, ActivityError::EnemiesNearby { count: 1 });
        assert!(err.to_string().contains("enemies nearby"));
    }

    #[test]
    fn enemy_outside_radius_is_ignored() {
        let config = GameConfig::default();
        let mut state = camp(Some(Position::new(6, 4)));
        let world = World::new(&mut state, GameEnv::new(&config));

        assert!(RestBehavior.validate(&rest(), &world).is_ok());
    }

    #[test]
    fn neutral_neighbours_do_not_count() {
        let config = GameConfig::default();
        let mut state = camp(None);
        state
            .add_actor(ActorState::new(
                EntityId(2),
                "merchant",
                Position::new(4, 5),
                Faction::Neutral,
            ))
            .unwrap();
        let world = World::new(&mut state, GameEnv::new(&config));

        assert!(RestBehavior.validate(&rest(), &world).is_ok());
    }

    #[test]
    fn each_rest_turn_heals() {
        let config = GameConfig::default();
        let mut state = camp(None);
        let mut world = World::new(&mut state, GameEnv::new(&config));
        let mut activity = rest();

        RestBehavior.do_turn(&mut activity, &mut world).unwrap();
        RestBehavior.do_turn(&mut activity, &mut world).unwrap();

        assert_eq!(activity.turns_left(), 1);
        assert_eq!(world.state.entities.actor(EntityId::PLAYER).unwrap().hp.current, 5);
    }

    #[test]
    fn enemy_arriving_mid_rest_fails_the_turn() {
        let config = GameConfig::default();
        let mut state = camp(None);
        let mut world = World::new(&mut state, GameEnv::new(&config));
        let mut activity = rest();

        RestBehavior.do_turn(&mut activity, &mut world).unwrap();
        world
            .state
            .add_actor(ActorState::new(
                EntityId(1),
                "goblin",
                Position::new(3, 3),
                Faction::Hostile,
            ))
            .unwrap();

        let err = RestBehavior.do_turn(&mut activity, &mut world).unwrap_err();
        assert!(matches!(err, ActivityError::EnemiesNearby { .. }));
        assert_eq!(activity.turns_left(), 2);
    }
}
