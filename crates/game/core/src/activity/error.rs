//! Activity errors.
//!
//! [`ActivityError`] covers everything a behavior hook can reject or fail
//! on; [`TransitionError`] covers refused state-machine transitions.

use super::{ActivityKind, ActivityState};
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, InventoryFull, ItemHandle, Position, RecipeId};

/// Failures raised by behavior hooks, during validation or execution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActivityError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("actor {0} is dead")]
    ActorDead(EntityId),

    #[error("a target is required")]
    MissingTarget,

    #[error("a position is required")]
    MissingPosition,

    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("target {0} not found")]
    TargetNotFound(EntityId),

    #[error("target {0} is dead")]
    TargetDead(EntityId),

    #[error("{to} is not adjacent to {from}")]
    NotAdjacent { from: Position, to: Position },

    #[error("cannot enter {0}")]
    InvalidDestination(Position),

    #[error("cannot rest with {count} enemies nearby")]
    EnemiesNearby { count: usize },

    #[error("item {0:?} is not in the inventory")]
    ItemNotHeld(ItemHandle),

    #[error("item {0:?} cannot be read")]
    NotReadable(ItemHandle),

    #[error("item {0:?} cannot be used")]
    NotUsable(ItemHandle),

    #[error("recipe {0:?} is not known")]
    RecipeUnknown(RecipeId),

    #[error("missing ingredient {0:?}")]
    MissingIngredient(ItemHandle),

    #[error("no workbench within reach")]
    NoWorkbench,

    #[error("the workbench is in use by {0}")]
    WorkbenchBusy(EntityId),

    #[error("nothing to pick up at {0}")]
    NothingToPickUp(Position),

    #[error("no portal at {0}")]
    NoPortal(Position),

    #[error("no door at {0}")]
    NoDoor(Position),

    #[error("door at {0} is obstructed")]
    DoorObstructed(Position),

    #[error("nothing to interact with at {0}")]
    NothingToInteract(Position),

    #[error(transparent)]
    Inventory(#[from] InventoryFull),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for ActivityError {
    fn severity(&self) -> ErrorSeverity {
        use ActivityError::*;
        match self {
            ActorNotFound(_) | TargetNotFound(_) => ErrorSeverity::Validation,
            MissingTarget | MissingPosition | MissingParameter(_) => ErrorSeverity::Validation,
            ActorDead(_) | TargetDead(_) => ErrorSeverity::Recoverable,
            NotAdjacent { .. } | InvalidDestination(_) => ErrorSeverity::Recoverable,
            EnemiesNearby { .. } => ErrorSeverity::Recoverable,
            ItemNotHeld(_) | NotReadable(_) | NotUsable(_) => ErrorSeverity::Validation,
            RecipeUnknown(_) | MissingIngredient(_) | NoWorkbench | WorkbenchBusy(_) => {
                ErrorSeverity::Recoverable
            }
            NothingToPickUp(_) | NoPortal(_) | NoDoor(_) | NothingToInteract(_) => {
                ErrorSeverity::Validation
            }
            DoorObstructed(_) | Inventory(_) => ErrorSeverity::Recoverable,
            Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use ActivityError::*;
        match self {
            ActorNotFound(_) => "ACTIVITY_ACTOR_NOT_FOUND",
            ActorDead(_) => "ACTIVITY_ACTOR_DEAD",
            MissingTarget => "ACTIVITY_MISSING_TARGET",
            MissingPosition => "ACTIVITY_MISSING_POSITION",
            MissingParameter(_) => "ACTIVITY_MISSING_PARAMETER",
            TargetNotFound(_) => "ACTIVITY_TARGET_NOT_FOUND",
            TargetDead(_) => "ACTIVITY_TARGET_DEAD",
            NotAdjacent { .. } => "ACTIVITY_NOT_ADJACENT",
            InvalidDestination(_) => "ACTIVITY_INVALID_DESTINATION",
            EnemiesNearby { .. } => "ACTIVITY_ENEMIES_NEARBY",
            ItemNotHeld(_) => "ACTIVITY_ITEM_NOT_HELD",
            NotReadable(_) => "ACTIVITY_NOT_READABLE",
            NotUsable(_) => "ACTIVITY_NOT_USABLE",
            RecipeUnknown(_) => "ACTIVITY_RECIPE_UNKNOWN",
            MissingIngredient(_) => "ACTIVITY_MISSING_INGREDIENT",
            NoWorkbench => "ACTIVITY_NO_WORKBENCH",
            WorkbenchBusy(_) => "ACTIVITY_WORKBENCH_BUSY",
            NothingToPickUp(_) => "ACTIVITY_NOTHING_TO_PICK_UP",
            NoPortal(_) => "ACTIVITY_NO_PORTAL",
            NoDoor(_) => "ACTIVITY_NO_DOOR",
            DoorObstructed(_) => "ACTIVITY_DOOR_OBSTRUCTED",
            NothingToInteract(_) => "ACTIVITY_NOTHING_TO_INTERACT",
            Inventory(_) => "ACTIVITY_INVENTORY_FULL",
            Oracle(err) => err.error_code(),
        }
    }
}

/// A refused activity state transition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("{0} cannot be interrupted")]
    NotInterruptible(ActivityKind),

    #[error("{0} cannot be resumed")]
    NotResumable(ActivityKind),

    #[error("{kind} is not running (state: {state:?})")]
    NotRunning {
        kind: ActivityKind,
        state: ActivityState,
    },

    #[error("{kind} is not paused (state: {state:?})")]
    NotPaused {
        kind: ActivityKind,
        state: ActivityState,
    },

    #[error("actor {0} has no activity")]
    NoActivity(EntityId),
}

impl GameError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoActivity(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInterruptible(_) => "TRANSITION_NOT_INTERRUPTIBLE",
            Self::NotResumable(_) => "TRANSITION_NOT_RESUMABLE",
            Self::NotRunning { .. } => "TRANSITION_NOT_RUNNING",
            Self::NotPaused { .. } => "TRANSITION_NOT_PAUSED",
            Self::NoActivity(_) => "TRANSITION_NO_ACTIVITY",
        }
    }
}
