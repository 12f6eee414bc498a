use super::{
    ActivityBehavior, actor_name, ensure_adjacent, ensure_within_reach, living_actor,
    living_target, required_position,
};
use crate::activity::{Activity, ActivityError, ActivityKind};
use crate::env::World;
use crate::state::{Position, PropFlags, PropKind, PropState};

fn reachable_door<'w>(
    activity: &Activity,
    world: &'w World<'_>,
) -> Result<&'w PropState, ActivityError> {
    let actor = living_actor(world, activity.actor())?;
    let position = required_position(activity)?;
    ensure_adjacent(actor.position, position)?;

    world
        .state
        .entities
        .prop_at(position)
        .filter(|prop| prop.is_door())
        .ok_or(ActivityError::NoDoor(position))
}

/// A doorway holding an actor or an item cannot be shut.
fn doorway_blocked(world: &World<'_>, position: Position) -> bool {
    world.state.entities.living_actor_at(position).is_some()
        || world.state.entities.item_at(position).is_some()
}

fn prop_mut<'w>(
    world: &'w mut World<'_>,
    position: Position,
) -> Result<&'w mut PropState, ActivityError> {
    world
        .state
        .entities
        .prop_at_mut(position)
        .ok_or(ActivityError::NothingToInteract(position))
}

/// Opens an adjacent door. Opening an open door succeeds without effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpenDoorBehavior;

impl ActivityBehavior for OpenDoorBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::OpenDoor
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        reachable_door(activity, world).map(|_| ())
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        let already_open = reachable_door(activity, world)?.is_open();
        let position = required_position(activity)?;

        if already_open {
            tracing::debug!(actor = %activity.actor(), %position, "door already open");
        } else {
            prop_mut(world, position)?.open();
            world.narrate("The door creaks open.");
        }
        activity.complete();
        Ok(())
    }
}

/// Closes an adjacent door. Closing a closed door succeeds without effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CloseDoorBehavior;

impl ActivityBehavior for CloseDoorBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::CloseDoor
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        let door = reachable_door(activity, world)?;
        if door.is_open() && doorway_blocked(world, door.position) {
            return Err(ActivityError::DoorObstructed(door.position));
        }
        Ok(())
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        self.validate(activity, world)?;
        let position = required_position(activity)?;

        let door = prop_mut(world, position)?;
        if door.is_open() {
            door.close();
            world.narrate("The door swings shut.");
        }
        activity.complete();
        Ok(())
    }
}

/// Talks to an adjacent living actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TalkBehavior;

impl ActivityBehavior for TalkBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Talk
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        let speaker = living_actor(world, activity.actor())?;
        let listener = living_target(activity, world)?;
        ensure_adjacent(speaker.position, listener.position)
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        self.validate(activity, world)?;
        let listener = living_target(activity, world)?;

        let message = match &listener.dialogue {
            Some(line) => format!("{}: \"{line}\"", listener.name),
            None => format!("{} has nothing to say.", listener.name),
        };
        world.narrate(message);
        activity.complete();
        Ok(())
    }
}

/// Generic use of whatever prop sits on or next to the actor's tile.
///
/// Doors toggle, switches flip `ACTIVE`, signs are read aloud.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractBehavior;

impl ActivityBehavior for InteractBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Interact
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        let actor = living_actor(world, activity.actor())?;
        let position = required_position(activity)?;
        ensure_within_reach(actor.position, position)?;

        let prop = world
            .state
            .entities
            .prop_at(position)
            .ok_or(ActivityError::NothingToInteract(position))?;
        if prop.is_door() && prop.is_open() && doorway_blocked(world, position) {
            return Err(ActivityError::DoorObstructed(position));
        }
        Ok(())
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        self.validate(activity, world)?;
        let position = required_position(activity)?;
        let name = actor_name(world, activity.actor());

        let prop = prop_mut(world, position)?;
        let message = match prop.kind.clone() {
            PropKind::Door if prop.is_open() => {
                prop.close();
                "The door swings shut.".to_string()
            }
            PropKind::Door => {
                prop.open();
                "The door creaks open.".to_string()
            }
            PropKind::Switch => {
                prop.flags.toggle(PropFlags::ACTIVE);
                let state = if prop.flags.contains(PropFlags::ACTIVE) {
                    "on"
                } else {
                    "off"
                };
                format!("{name} flips the switch {state}.")
            }
            PropKind::Sign { text } => format!("The sign reads: \"{text}\""),
            PropKind::Portal { destination } => {
                format!("A shimmering portal leads to {destination}.")
            }
            PropKind::Workbench => "A sturdy workbench, fit for crafting.".to_string(),
        };

        world.narrate(message);
        activity.complete();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::GameEnv;
    use crate::state::{ActorState, EntityId, Faction, GameState, WorldMap};

    const DOOR: Position = Position::new(3, 2);

    fn hallway() -> GameState {
        let mut state = GameState::new(WorldMap::bordered(6, 6), 100);
        state
            .add_actor(ActorState::new(
                EntityId::PLAYER,
                "hero",
                Position::new(2, 2),
                Faction::Player,
            ))
            .unwrap();
        state.add_prop(PropState::door(EntityId(1), DOOR, false)).unwrap();
        state
    }

    fn at_door(behavior: impl Into<crate::activity::Behavior>, kind: ActivityKind) -> Activity {
        Activity::new(behavior.into(), EntityId::PLAYER, kind.info(), 1).with_position(DOOR)
    }

    #[test]
    fn opening_twice_is_a_quiet_success() {
        let config = GameConfig::default();
        let mut state = hallway();
        let mut log: Vec<String> = Vec::new();
        let mut world = World::new(&mut state, GameEnv::new(&config)).with_narrator(&mut log);

        for _ in 0..2 {
            let mut open = at_door(OpenDoorBehavior, ActivityKind::OpenDoor);
            OpenDoorBehavior.validate(&open, &world).unwrap();
            OpenDoorBehavior.do_turn(&mut open, &mut world).unwrap();
            assert!(open.is_completed());
        }

        let door = world.state.entities.prop_at(DOOR).unwrap();
        assert!(door.is_open());
        assert!(!door.blocks_movement());
        assert!(!door.blocks_view());
        drop(world);
        assert_eq!(log, vec!["The door creaks open."]);
    }

    #[test]
    fn closing_an_occupied_doorway_is_refused() {
        let config = GameConfig::default();
        let mut state = hallway();
        state.entities.prop_at_mut(DOOR).unwrap().open();
        state
            .add_actor(ActorState::new(EntityId(2), "cat", DOOR, Faction::Neutral))
            .unwrap();
        let world = World::new(&mut state, GameEnv::new(&config));

        assert_eq!(
            CloseDoorBehavior.validate(&at_door(CloseDoorBehavior, ActivityKind::CloseDoor), &world),
            Err(ActivityError::DoorObstructed(DOOR))
        );
    }

    #[test]
    fn interact_toggles_door_both_ways() {
        let config = GameConfig::default();
        let mut state = hallway();
        let mut world = World::new(&mut state, GameEnv::new(&config));

        let mut first = at_door(InteractBehavior, ActivityKind::Interact);
        InteractBehavior.do_turn(&mut first, &mut world).unwrap();
        assert!(world.state.entities.prop_at(DOOR).unwrap().is_open());

        let mut second = at_door(InteractBehavior, ActivityKind::Interact);
        InteractBehavior.do_turn(&mut second, &mut world).unwrap();
        assert!(world.state.entities.prop_at(DOOR).unwrap().blocks_movement());
    }

    #[test]
    fn talk_uses_dialogue_or_fallback() {
        let config = GameConfig::default();
        let mut state = hallway();
        state
            .add_actor(
                ActorState::new(EntityId(2), "sage", Position::new(1, 2), Faction::Neutral)
                    .with_dialogue("Mind the stairs."),
            )
            .unwrap();
        state
            .add_actor(ActorState::new(EntityId(3), "mute", Position::new(2, 1), Faction::Neutral))
            .unwrap();
        let mut log: Vec<String> = Vec::new();
        let mut world = World::new(&mut state, GameEnv::new(&config)).with_narrator(&mut log);

        for target in [EntityId(2), EntityId(3)] {
            let mut talk = Activity::new(
                TalkBehavior.into(),
                EntityId::PLAYER,
                ActivityKind::Talk.info(),
                1,
            )
            .with_target(target);
            TalkBehavior.do_turn(&mut talk, &mut world).unwrap();
        }

        drop(world);
        assert_eq!(log, vec!["sage: \"Mind the stairs.\"", "mute has nothing to say."]);
    }
}
