use super::{ActivityBehavior, actor_mut, actor_name, ensure_within_reach, item_name, living_actor};
use crate::activity::{Activity, ActivityError, ActivityKind};
use crate::config::GameConfig;
use crate::env::{ItemKind, World};
use crate::state::{InventoryFull, ItemHandle, ItemState, Position};

/// Picks up the ground item on the actor's tile, or on an adjacent tile
/// when the activity carries an explicit position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PickUpBehavior;

impl PickUpBehavior {
    fn location(activity: &Activity, world: &World<'_>) -> Result<Position, ActivityError> {
        let actor = living_actor(world, activity.actor())?;
        let location = activity.position().unwrap_or(actor.position);
        ensure_within_reach(actor.position, location)?;
        Ok(location)
    }

    fn ground_item(activity: &Activity, world: &World<'_>) -> Result<ItemState, ActivityError> {
        let location = Self::location(activity, world)?;
        world
            .state
            .entities
            .item_at(location)
            .cloned()
            .ok_or(ActivityError::NothingToPickUp(location))
    }
}

impl ActivityBehavior for PickUpBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::PickUp
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        Self::ground_item(activity, world)?;
        if living_actor(world, activity.actor())?.inventory.is_full() {
            return Err(InventoryFull {
                capacity: GameConfig::MAX_INVENTORY_SLOTS,
            }
            .into());
        }
        Ok(())
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        self.validate(activity, world)?;
        let item = Self::ground_item(activity, world)?;
        let label = item_name(world, item.handle);
        let name = actor_name(world, activity.actor());

        actor_mut(world, activity.actor())?.inventory.add(item.handle)?;
        world.state.entities.take_item(item.id);

        world.narrate(format!("{name} picks up {label}."));
        activity.complete();
        Ok(())
    }
}

/// Uses a held consumable. Healing is capped at the actor's maximum HP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UseItemBehavior {
    pub item: ItemHandle,
}

impl UseItemBehavior {
    fn heal_amount(&self, world: &World<'_>) -> Result<u32, ActivityError> {
        match world.env.item(self.item)?.kind {
            ItemKind::Consumable { heal } => Ok(heal),
            _ => Err(ActivityError::NotUsable(self.item)),
        }
    }
}

impl ActivityBehavior for UseItemBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::UseItem
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        let actor = living_actor(world, activity.actor())?;
        if !actor.inventory.contains(self.item) {
            return Err(ActivityError::ItemNotHeld(self.item));
        }
        self.heal_amount(world).map(|_| ())
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        self.validate(activity, world)?;
        let heal = self.heal_amount(world)?;
        let label = item_name(world, self.item);
        let name = actor_name(world, activity.actor());

        let actor = actor_mut(world, activity.actor())?;
        if !actor.inventory.remove_one(self.item) {
            return Err(ActivityError::ItemNotHeld(self.item));
        }
        let healed = actor.hp.restore(heal);

        world.narrate(format!("{name} uses {label} and recovers {healed} HP."));
        activity.complete();
        Ok(())
    }
}
