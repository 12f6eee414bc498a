//! State management errors.
//!
//! Errors related to entity registration and capacity limits.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Errors that occur while populating or resizing the game state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Actor list is full (max capacity reached).
    #[error("Actor list is full (max: {max})")]
    ActorListFull { max: usize },

    /// Prop list is full (max capacity reached).
    #[error("Prop list is full (max: {max})")]
    PropListFull { max: usize },

    /// Item list is full (max capacity reached).
    #[error("Item list is full (max: {max})")]
    ItemListFull { max: usize },

    /// An entity with the same ID is already registered.
    #[error("Entity {0} already exists")]
    DuplicateEntity(EntityId),

    /// Position is outside the map bounds.
    #[error("Position {position} is out of bounds (map size: {width}x{height})")]
    PositionOutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorListFull { .. } | Self::PropListFull { .. } | Self::ItemListFull { .. } => {
                ErrorSeverity::Fatal
            }
            Self::DuplicateEntity(_) => ErrorSeverity::Internal,
            Self::PositionOutOfBounds { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorListFull { .. } => "STATE_ACTOR_LIST_FULL",
            Self::PropListFull { .. } => "STATE_PROP_LIST_FULL",
            Self::ItemListFull { .. } => "STATE_ITEM_LIST_FULL",
            Self::DuplicateEntity(_) => "STATE_DUPLICATE_ENTITY",
            Self::PositionOutOfBounds { .. } => "STATE_POSITION_OUT_OF_BOUNDS",
        }
    }
}
