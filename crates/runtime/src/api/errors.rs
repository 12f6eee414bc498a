//! Unified error types surfaced by the runtime API.
//!
//! Wraps Action API failures and turn-ledger refusals so clients can bubble
//! them up with consistent context.
use thiserror::Error;

use delve_core::{ActionApiError, EntityId, ErrorSeverity, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("no living player in the level")]
    NoPlayer,

    #[error("action actor {provided} is not the player {expected}")]
    InvalidActionActor {
        expected: EntityId,
        provided: EntityId,
    },

    #[error("player needs {required} moves but only {available} remain this turn")]
    InsufficientMoves { required: u32, available: u32 },

    #[error(transparent)]
    Api(#[from] ActionApiError),
}

impl RuntimeError {
    /// Whether the session can go on after this refusal, e.g. by passing the turn.
    pub fn is_recoverable(&self) -> bool {
        !self.severity().is_internal()
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoPlayer => ErrorSeverity::Fatal,
            Self::InvalidActionActor { .. } | Self::InsufficientMoves { .. } => {
                ErrorSeverity::Validation
            }
            Self::Api(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoPlayer => "RUNTIME_NO_PLAYER",
            Self::InvalidActionActor { .. } => "RUNTIME_INVALID_ACTOR",
            Self::InsufficientMoves { .. } => "RUNTIME_INSUFFICIENT_MOVES",
            Self::Api(err) => err.error_code(),
        }
    }
}
