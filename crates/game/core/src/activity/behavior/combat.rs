use super::{
    ActivityBehavior, actor_name, ensure_adjacent, living_actor, living_target,
};
use crate::activity::{Activity, ActivityError, ActivityKind};
use crate::env::World;

/// Melee strike against an adjacent living target.
///
/// Damage is the attacker's flat `attack` value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackBehavior;

impl ActivityBehavior for AttackBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Attack
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        let attacker = living_actor(world, activity.actor())?;
        let target = living_target(activity, world)?;
        ensure_adjacent(attacker.position, target.position)
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        self.validate(activity, world)?;

        let damage = living_actor(world, activity.actor())?.attack;
        let target_id = activity.target().ok_or(ActivityError::MissingTarget)?;
        let attacker_name = actor_name(world, activity.actor());

        let target = world
            .state
            .entities
            .actor_mut(target_id)
            .ok_or(ActivityError::TargetNotFound(target_id))?;
        let dealt = target.hp.drain(damage);
        let target_name = target.name.clone();

        world.narrate(format!("{attacker_name} hits {target_name} for {dealt}."));
        activity.complete();
        Ok(())
    }

    fn finish(&self, activity: &Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        let Some(target_id) = activity.target() else {
            return Ok(());
        };
        let slain = world
            .state
            .entities
            .actor(target_id)
            .filter(|target| !target.is_alive())
            .map(|target| target.name.clone());

        if let Some(name) = slain {
            tracing::debug!(attacker = %activity.actor(), target = %target_id, "target slain");
            world.narrate(format!("{name} dies."));
        }
        Ok(())
    }
}
