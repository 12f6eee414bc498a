use super::{ActivityBehavior, actor_mut, actor_name, item_name, living_actor, narrate_canceled};
use crate::activity::{Activity, ActivityError, ActivityKind};
use crate::env::{ItemKind, World};
use crate::state::{EntityId, ItemHandle, Position, PropState, RecipeId};

/// Reads a book over several turns; finishing teaches its recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadBehavior {
    pub book: ItemHandle,
}

impl ReadBehavior {
    fn teaches(&self, world: &World<'_>) -> Result<RecipeId, ActivityError> {
        match world.env.item(self.book)?.kind {
            ItemKind::Book { teaches } => Ok(teaches),
            _ => Err(ActivityError::NotReadable(self.book)),
        }
    }
}

impl ActivityBehavior for ReadBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Read
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        let reader = living_actor(world, activity.actor())?;
        if !reader.inventory.contains(self.book) {
            return Err(ActivityError::ItemNotHeld(self.book));
        }
        self.teaches(world).map(|_| ())
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        // The book may have been dropped or used up since the last turn.
        self.validate(activity, world)?;
        activity.advance();
        Ok(())
    }

    fn finish(&self, activity: &Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        let recipe = world.env.recipe(self.teaches(world)?)?;
        let name = actor_name(world, activity.actor());

        let reader = actor_mut(world, activity.actor())?;
        if !reader.knows_recipe(recipe.id) {
            reader.known_recipes.push(recipe.id);
        }
        world.narrate(format!("{name} learns how to make {}.", recipe.name));
        Ok(())
    }
}

/// Crafts a known recipe at a workbench. Ingredients are consumed on completion.
///
/// Starting claims a free bench within reach for the crafter; the claim is
/// released when the craft finishes or is canceled. A claim whose holder has
/// died or walked away from the bench no longer counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CraftBehavior {
    pub recipe: RecipeId,
}

impl CraftBehavior {
    fn holder(bench: &PropState, crafter: EntityId, world: &World<'_>) -> Option<EntityId> {
        let holder = bench.claimed_by.filter(|&id| id != crafter)?;
        world
            .state
            .entities
            .actor(holder)
            .filter(|actor| actor.is_alive())
            .filter(|actor| actor.position.chebyshev_distance(bench.position) <= 1)
            .map(|_| holder)
    }

    fn release(actor: EntityId, world: &mut World<'_>) {
        for bench in world.state.entities.props.iter_mut() {
            if bench.claimed_by == Some(actor) {
                bench.claimed_by = None;
            }
        }
    }
}

fn within_reach(bench: &PropState, position: Position) -> bool {
    bench.is_workbench() && bench.position.chebyshev_distance(position) <= 1
}

impl ActivityBehavior for CraftBehavior {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Craft
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        let crafter = living_actor(world, activity.actor())?;
        if !crafter.knows_recipe(self.recipe) {
            return Err(ActivityError::RecipeUnknown(self.recipe));
        }
        let recipe = world.env.recipe(self.recipe)?;

        let at_bench = world
            .state
            .entities
            .props
            .iter()
            .any(|prop| within_reach(prop, crafter.position));
        if !at_bench {
            return Err(ActivityError::NoWorkbench);
        }

        for ingredient in &recipe.ingredients {
            let needed = recipe.ingredients.iter().filter(|&i| i == ingredient).count();
            if crafter.inventory.count(*ingredient) < needed {
                return Err(ActivityError::MissingIngredient(*ingredient));
            }
        }
        Ok(())
    }

    fn start(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        let crafter = activity.actor();
        let position = living_actor(world, crafter)?.position;

        let mut busy_with = None;
        let mut free = None;
        for (slot, bench) in world.state.entities.props.iter().enumerate() {
            if !within_reach(bench, position) {
                continue;
            }
            match Self::holder(bench, crafter, world) {
                Some(holder) => busy_with = busy_with.or(Some(holder)),
                None => {
                    free = Some(slot);
                    break;
                }
            }
        }

        match (free, busy_with) {
            (Some(slot), _) => {
                world.state.entities.props[slot].claimed_by = Some(crafter);
                Ok(())
            }
            (None, Some(holder)) => Err(ActivityError::WorkbenchBusy(holder)),
            (None, None) => Err(ActivityError::NoWorkbench),
        }
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        self.validate(activity, world)?;
        activity.advance();
        Ok(())
    }

    fn finish(&self, activity: &Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        Self::release(activity.actor(), world);
        let recipe = world.env.recipe(self.recipe)?;
        let product = item_name(world, recipe.product);
        let name = actor_name(world, activity.actor());

        let crafter = actor_mut(world, activity.actor())?;
        for ingredient in &recipe.ingredients {
            if !crafter.inventory.remove_one(*ingredient) {
                return Err(ActivityError::MissingIngredient(*ingredient));
            }
        }
        crafter.inventory.add(recipe.product)?;

        world.narrate(format!("{name} crafts {product}."));
        Ok(())
    }

    fn canceled(&self, activity: &Activity, world: &mut World<'_>) {
        Self::release(activity.actor(), world);
        narrate_canceled(activity, world);
    }
}
