//! Per-kind activity strategies.
//!
//! Each kind has a small `Copy` struct implementing [`ActivityBehavior`];
//! [`Behavior`] is the tagged union the [`Activity`] stores. The manager
//! copies the behavior out of the activity before calling a hook, so hooks
//! can take the activity mutably.
mod combat;
mod interact;
mod inventory;
mod movement;
mod rest;
mod study;

pub use combat::AttackBehavior;
pub use interact::{CloseDoorBehavior, InteractBehavior, OpenDoorBehavior, TalkBehavior};
pub use inventory::{PickUpBehavior, UseItemBehavior};
pub use movement::{MoveBehavior, WarpBehavior};
pub use rest::{RestBehavior, WaitBehavior};
pub use study::{CraftBehavior, ReadBehavior};

use super::{Activity, ActivityError, ActivityKind};
use crate::env::World;
use crate::state::{ActorState, EntityId, ItemHandle, Position, RecipeId};

/// Lifecycle hooks every activity kind implements.
///
/// * `validate` is a pure precondition check. It runs before registration,
///   again on resume, and from `do_turn` for kinds whose preconditions can
///   lapse mid-activity.
/// * `start` runs once after registration; an error rolls the activity back.
/// * `do_turn` advances one turn and completes the activity on the last one.
///   An error cancels the activity.
/// * `finish` runs exactly once after completion.
/// * `canceled` runs exactly once after cancellation.
pub trait ActivityBehavior {
    fn kind(&self) -> ActivityKind;

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError>;

    fn start(&self, _activity: &mut Activity, _world: &mut World<'_>) -> Result<(), ActivityError> {
        Ok(())
    }

    fn do_turn(&self, activity: &mut Activity, world: &mut World<'_>)
    -> Result<(), ActivityError>;

    fn finish(&self, _activity: &Activity, _world: &mut World<'_>) -> Result<(), ActivityError> {
        Ok(())
    }

    fn canceled(&self, activity: &Activity, world: &mut World<'_>) {
        narrate_canceled(activity, world);
    }
}

/// Behavior of an activity, one variant per [`ActivityKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    Move(MoveBehavior),
    Attack(AttackBehavior),
    Rest(RestBehavior),
    Wait(WaitBehavior),
    Read(ReadBehavior),
    Craft(CraftBehavior),
    PickUp(PickUpBehavior),
    Warp(WarpBehavior),
    OpenDoor(OpenDoorBehavior),
    CloseDoor(CloseDoorBehavior),
    Talk(TalkBehavior),
    UseItem(UseItemBehavior),
    Interact(InteractBehavior),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $call:expr) => {
        match $self {
            Behavior::Move($inner) => $call,
            Behavior::Attack($inner) => $call,
            Behavior::Rest($inner) => $call,
            Behavior::Wait($inner) => $call,
            Behavior::Read($inner) => $call,
            Behavior::Craft($inner) => $call,
            Behavior::PickUp($inner) => $call,
            Behavior::Warp($inner) => $call,
            Behavior::OpenDoor($inner) => $call,
            Behavior::CloseDoor($inner) => $call,
            Behavior::Talk($inner) => $call,
            Behavior::UseItem($inner) => $call,
            Behavior::Interact($inner) => $call,
        }
    };
}

macro_rules! impl_from_behavior {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Behavior {
                fn from(behavior: $ty) -> Self {
                    Behavior::$variant(behavior)
                }
            }
        )*
    };
}

impl_from_behavior!(
    Move(MoveBehavior),
    Attack(AttackBehavior),
    Rest(RestBehavior),
    Wait(WaitBehavior),
    Read(ReadBehavior),
    Craft(CraftBehavior),
    PickUp(PickUpBehavior),
    Warp(WarpBehavior),
    OpenDoor(OpenDoorBehavior),
    CloseDoor(CloseDoorBehavior),
    Talk(TalkBehavior),
    UseItem(UseItemBehavior),
    Interact(InteractBehavior),
);

impl Behavior {
    /// Builds the behavior for `kind`, pulling kind-specific parameters.
    ///
    /// Read and UseItem need `item`; Craft needs `recipe`.
    pub fn for_kind(
        kind: ActivityKind,
        item: Option<ItemHandle>,
        recipe: Option<RecipeId>,
    ) -> Result<Self, ActivityError> {
        let need_item = || item.ok_or(ActivityError::MissingParameter("item"));

        Ok(match kind {
            ActivityKind::Move => Self::Move(MoveBehavior),
            ActivityKind::Attack => Self::Attack(AttackBehavior),
            ActivityKind::Rest => Self::Rest(RestBehavior),
            ActivityKind::Wait => Self::Wait(WaitBehavior),
            ActivityKind::Read => Self::Read(ReadBehavior { book: need_item()? }),
            ActivityKind::Craft => Self::Craft(CraftBehavior {
                recipe: recipe.ok_or(ActivityError::MissingParameter("recipe"))?,
            }),
            ActivityKind::PickUp => Self::PickUp(PickUpBehavior),
            ActivityKind::Warp => Self::Warp(WarpBehavior),
            ActivityKind::OpenDoor => Self::OpenDoor(OpenDoorBehavior),
            ActivityKind::CloseDoor => Self::CloseDoor(CloseDoorBehavior),
            ActivityKind::Talk => Self::Talk(TalkBehavior),
            ActivityKind::UseItem => Self::UseItem(UseItemBehavior { item: need_item()? }),
            ActivityKind::Interact => Self::Interact(InteractBehavior),
        })
    }
}

impl ActivityBehavior for Behavior {
    fn kind(&self) -> ActivityKind {
        dispatch!(self, inner => inner.kind())
    }

    fn validate(&self, activity: &Activity, world: &World<'_>) -> Result<(), ActivityError> {
        dispatch!(self, inner => inner.validate(activity, world))
    }

    fn start(&self, activity: &mut Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        dispatch!(self, inner => inner.start(activity, world))
    }

    fn do_turn(
        &self,
        activity: &mut Activity,
        world: &mut World<'_>,
    ) -> Result<(), ActivityError> {
        dispatch!(self, inner => inner.do_turn(activity, world))
    }

    fn finish(&self, activity: &Activity, world: &mut World<'_>) -> Result<(), ActivityError> {
        dispatch!(self, inner => inner.finish(activity, world))
    }

    fn canceled(&self, activity: &Activity, world: &mut World<'_>) {
        dispatch!(self, inner => inner.canceled(activity, world))
    }
}

// ============================================================================
// Shared lookups
// ============================================================================

/// The activity's actor, which must exist and be alive.
pub(crate) fn living_actor<'w>(
    world: &'w World<'_>,
    id: EntityId,
) -> Result<&'w ActorState, ActivityError> {
    let actor = world
        .state
        .entities
        .actor(id)
        .ok_or(ActivityError::ActorNotFound(id))?;
    if !actor.is_alive() {
        return Err(ActivityError::ActorDead(id));
    }
    Ok(actor)
}

pub(crate) fn actor_mut<'w>(
    world: &'w mut World<'_>,
    id: EntityId,
) -> Result<&'w mut ActorState, ActivityError> {
    world
        .state
        .entities
        .actor_mut(id)
        .ok_or(ActivityError::ActorNotFound(id))
}

/// The activity's target, which must exist and be alive.
pub(crate) fn living_target<'w>(
    activity: &Activity,
    world: &'w World<'_>,
) -> Result<&'w ActorState, ActivityError> {
    let id = activity.target().ok_or(ActivityError::MissingTarget)?;
    let target = world
        .state
        .entities
        .actor(id)
        .ok_or(ActivityError::TargetNotFound(id))?;
    if !target.is_alive() {
        return Err(ActivityError::TargetDead(id));
    }
    Ok(target)
}

pub(crate) fn required_position(activity: &Activity) -> Result<Position, ActivityError> {
    activity.position().ok_or(ActivityError::MissingPosition)
}

/// `to` must be one of the eight tiles around `from`.
pub(crate) fn ensure_adjacent(from: Position, to: Position) -> Result<(), ActivityError> {
    if from.is_adjacent(to) {
        Ok(())
    } else {
        Err(ActivityError::NotAdjacent { from, to })
    }
}

/// `to` is `from` itself or one of its neighbours.
pub(crate) fn ensure_within_reach(from: Position, to: Position) -> Result<(), ActivityError> {
    if from.chebyshev_distance(to) <= 1 {
        Ok(())
    } else {
        Err(ActivityError::NotAdjacent { from, to })
    }
}

/// Display name of an item, falling back to a generic noun when the catalog
/// is unavailable.
pub(crate) fn item_name(world: &World<'_>, handle: ItemHandle) -> String {
    world
        .env
        .item(handle)
        .map(|definition| definition.name)
        .unwrap_or_else(|_| "an item".to_string())
}

pub(crate) fn actor_name(world: &World<'_>, id: EntityId) -> String {
    world
        .state
        .entities
        .actor(id)
        .map(|actor| actor.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Default cancel narration: continuous activities report the interruption,
/// instant ones report the failure.
pub(crate) fn narrate_canceled(activity: &Activity, world: &mut World<'_>) {
    let reason = activity.cancel_reason().unwrap_or("unknown reason");
    let message = if activity.turns_total() > 1 {
        format!("activity interrupted: {reason}")
    } else {
        format!("{} failed: {reason}", activity.info().name)
    };
    world.narrate(message);
}
