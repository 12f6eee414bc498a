use crate::activity::ActivityKind;
use crate::state::{EntityId, ItemHandle, Position, RecipeId};

/// Optional inputs an activity kind may need.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionParams {
    pub target: Option<EntityId>,
    pub position: Option<Position>,
    pub item: Option<ItemHandle>,
    pub recipe: Option<RecipeId>,
    /// Explicit duration; overrides the AP-derived one.
    pub turns: Option<u32>,
}

/// Request to have `actor` pursue an activity of `kind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRequest {
    pub kind: ActivityKind,
    pub actor: EntityId,
    pub params: ActionParams,
}

impl ActionRequest {
    pub fn new(kind: ActivityKind, actor: EntityId) -> Self {
        Self {
            kind,
            actor,
            params: ActionParams::default(),
        }
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.params.target = Some(target);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.params.position = Some(position);
        self
    }

    pub fn with_item(mut self, item: ItemHandle) -> Self {
        self.params.item = Some(item);
        self
    }

    pub fn with_recipe(mut self, recipe: RecipeId) -> Self {
        self.params.recipe = Some(recipe);
        self
    }

    pub fn with_turns(mut self, turns: u32) -> Self {
        self.params.turns = Some(turns);
        self
    }

    // ===== per-kind shorthands =====

    pub fn move_to(actor: EntityId, destination: Position) -> Self {
        Self::new(ActivityKind::Move, actor).with_position(destination)
    }

    pub fn attack(actor: EntityId, target: EntityId) -> Self {
        Self::new(ActivityKind::Attack, actor).with_target(target)
    }

    pub fn rest(actor: EntityId) -> Self {
        Self::new(ActivityKind::Rest, actor)
    }

    /// A single-turn wait.
    pub fn wait(actor: EntityId) -> Self {
        Self::new(ActivityKind::Wait, actor)
    }

    pub fn wait_for(actor: EntityId, turns: u32) -> Self {
        Self::wait(actor).with_turns(turns)
    }

    pub fn read(actor: EntityId, book: ItemHandle) -> Self {
        Self::new(ActivityKind::Read, actor).with_item(book)
    }

    pub fn craft(actor: EntityId, recipe: RecipeId) -> Self {
        Self::new(ActivityKind::Craft, actor).with_recipe(recipe)
    }

    pub fn pick_up(actor: EntityId) -> Self {
        Self::new(ActivityKind::PickUp, actor)
    }

    pub fn warp(actor: EntityId) -> Self {
        Self::new(ActivityKind::Warp, actor)
    }

    pub fn open_door(actor: EntityId, door: Position) -> Self {
        Self::new(ActivityKind::OpenDoor, actor).with_position(door)
    }

    pub fn close_door(actor: EntityId, door: Position) -> Self {
        Self::new(ActivityKind::CloseDoor, actor).with_position(door)
    }

    pub fn talk(actor: EntityId, target: EntityId) -> Self {
        Self::new(ActivityKind::Talk, actor).with_target(target)
    }

    pub fn use_item(actor: EntityId, item: ItemHandle) -> Self {
        Self::new(ActivityKind::UseItem, actor).with_item(item)
    }

    pub fn interact(actor: EntityId, at: Position) -> Self {
        Self::new(ActivityKind::Interact, actor).with_position(at)
    }
}

/// How an executed request ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Instant action resolved this call.
    Completed,
    /// Continuous action registered; it advances with later turns.
    Started { turns: u32 },
    /// Instant action failed while resolving.
    Canceled { reason: String },
}

/// Result of [`ActionApi::execute`](super::ActionApi::execute).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionResult {
    pub actor: EntityId,
    pub kind: ActivityKind,
    pub outcome: ActionOutcome,
    /// AP (or player moves) withdrawn by this call.
    pub ap_spent: u32,
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, ActionOutcome::Canceled { .. })
    }
}
