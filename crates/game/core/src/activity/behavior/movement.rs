use super::{ActivityBehavior, actor_mut, ensure_adjacent, living_actor, required_position};
use crate::activity::{Activity, ActivityError, ActivityKind};
use crate::env::World;
use crate::state::{PropKind, Position};

/// Single greedy step onto an adjacent, enterable tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveBehavior;

impl ActivityBehavior for MoveBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Move
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        let actor = living_actor(world, activity.actor())?;
        let destination = required_position(activity)?;
        ensure_adjacent(actor.position, destination)?;

        if !world.state.can_enter(destination) {
            return Err(ActivityError::InvalidDestination(destination));
        }
        Ok(())
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        // The tile may have been taken since the request was validated.
        self.validate(activity, world)?;
        let destination = required_position(activity)?;

        actor_mut(world, activity.actor())?.position = destination;
        activity.complete();
        Ok(())
    }
}

/// Teleports an actor standing on a portal to the portal's destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WarpBehavior;

impl WarpBehavior {
    fn destination(activity: &Activity, world: &World<'_>) -> Result<Position, ActivityError> {
        let actor = living_actor(world, activity.actor())?;
        match world.state.entities.prop_at(actor.position).map(|prop| &prop.kind) {
            Some(PropKind::Portal { destination }) => Ok(*destination),
            _ => Err(ActivityError::NoPortal(actor.position)),
        }
    }
}

impl ActivityBehavior for WarpBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Warp
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        let destination = Self::destination(activity, world)?;
        if !world.state.can_enter(destination) {
            return Err(ActivityError::InvalidDestination(destination));
        }
        Ok(())
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        self.validate(activity, world)?;
        let destination = Self::destination(activity, world)?;

        actor_mut(world, activity.actor())?.position = destination;
        activity.complete();
        Ok(())
    }

    fn finish(&self, activity: &Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        let name = super::actor_name(world, activity.actor());
        world.narrate(format!("{name} steps through the portal."));
        Ok(())
    }
}
