//! Error types for the activity lifecycle pipeline.

use crate::activity::{ActivityError, ActivityKind, TransitionError};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which behavior hook produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifecyclePhase {
    Validate,
    Start,
    Turn,
    Finish,
}

impl LifecyclePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecyclePhase::Validate => "validate",
            LifecyclePhase::Start => "start",
            LifecyclePhase::Turn => "turn",
            LifecyclePhase::Finish => "finish",
        }
    }
}

/// Associates a lifecycle phase and activity kind with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseError {
    pub phase: LifecyclePhase,
    pub kind: ActivityKind,
    pub error: ActivityError,
}

impl PhaseError {
    pub fn new(phase: LifecyclePhase, kind: ActivityKind, error: ActivityError) -> Self {
        Self { phase, kind, error }
    }
}

impl std::fmt::Display for PhaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} failed for {}: {}",
            self.phase.as_str(),
            self.kind,
            self.error
        )
    }
}

impl std::error::Error for PhaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl GameError for PhaseError {
    fn severity(&self) -> ErrorSeverity {
        self.error.severity()
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}

/// Errors surfaced by the activity manager.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ManagerError {
    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl GameError for ManagerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Phase(err) => err.severity(),
            Self::Transition(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Phase(err) => err.error_code(),
            Self::Transition(err) => err.error_code(),
        }
    }
}
