//! Oracle access errors.
//!
//! Errors related to oracle availability and data access.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ItemHandle, RecipeId};

/// Errors that occur when accessing Oracle data.
///
/// Oracle errors indicate that required game data is unavailable or that a
/// reference held by the state does not resolve to a definition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// ItemOracle is not available in the environment.
    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    /// Item definition was not found by handle.
    #[error("item definition {0:?} not found")]
    ItemNotFound(ItemHandle),

    /// Recipe was not found by ID.
    #[error("recipe {0:?} not found")]
    RecipeNotFound(RecipeId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Missing oracles are fatal - behaviors depending on them cannot proceed
            ItemsNotAvailable => ErrorSeverity::Fatal,

            // Not found errors are validation errors - invalid references
            ItemNotFound(_) | RecipeNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
            RecipeNotFound(_) => "ORACLE_RECIPE_NOT_FOUND",
        }
    }
}
