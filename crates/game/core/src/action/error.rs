//! Action API errors.

use crate::activity::ActivityKind;
use crate::engine::ManagerError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Errors returned by [`ActionApi`](super::ActionApi) calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionApiError {
    /// The requesting actor is not registered in the state.
    #[error("unknown actor {0}")]
    UnknownActor(EntityId),

    /// The request lacks a parameter the activity kind declares as mandatory.
    #[error("{kind} requires a {parameter}")]
    MissingParameter {
        kind: ActivityKind,
        parameter: &'static str,
    },

    #[error(transparent)]
    Manager(#[from] ManagerError),
}

impl GameError for ActionApiError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownActor(_) | Self::MissingParameter { .. } => ErrorSeverity::Validation,
            Self::Manager(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownActor(_) => "ACTION_UNKNOWN_ACTOR",
            Self::MissingParameter { .. } => "ACTION_MISSING_PARAMETER",
            Self::Manager(err) => err.error_code(),
        }
    }
}
