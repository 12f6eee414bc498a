//! Read-only collaborators and the mutable world context.
//!
//! Oracles expose item definitions and activity tables. [`GameEnv`] bundles
//! them with the active [`GameConfig`] so behaviors can reach everything they
//! need without hard coupling to concrete implementations. [`World`] pairs the
//! environment with the mutable [`GameState`] and the optional narration sink;
//! it is threaded explicitly through every activity hook.
mod activities;
mod error;
mod items;
mod narration;
mod rng;

pub use activities::ActivityOracle;
pub use error::OracleError;
pub use items::{ItemDefinition, ItemKind, ItemOracle, Recipe};
pub use narration::{MessageLog, NarrationSink};
pub use rng::PcgRng;

use crate::activity::{ActivityInfo, ActivityKind};
use crate::config::GameConfig;
use crate::state::{GameState, ItemHandle, RecipeId};

/// Aggregates read-only oracles and configuration required by behaviors.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    config: &'a GameConfig,
    items: Option<&'a dyn ItemOracle>,
    activities: Option<&'a dyn ActivityOracle>,
}

impl<'a> GameEnv<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self {
            config,
            items: None,
            activities: None,
        }
    }

    pub fn with_items(mut self, items: &'a dyn ItemOracle) -> Self {
        self.items = Some(items);
        self
    }

    pub fn with_activities(mut self, activities: &'a dyn ActivityOracle) -> Self {
        self.activities = Some(activities);
        self
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Returns the ItemOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no items oracle was provided.
    pub fn items(&self) -> Result<&'a dyn ItemOracle, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    pub fn item(&self, handle: ItemHandle) -> Result<ItemDefinition, OracleError> {
        self.items()?
            .definition(handle)
            .ok_or(OracleError::ItemNotFound(handle))
    }

    pub fn recipe(&self, id: RecipeId) -> Result<Recipe, OracleError> {
        self.items()?
            .recipe(id)
            .ok_or(OracleError::RecipeNotFound(id))
    }

    /// Static metadata for `kind`: the oracle's override, else the built-in table.
    pub fn activity_info(&self, kind: ActivityKind) -> ActivityInfo {
        self.activities
            .and_then(|oracle| oracle.info(kind))
            .unwrap_or_else(|| kind.info())
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .field("items", &self.items.is_some())
            .field("activities", &self.activities.is_some())
            .finish()
    }
}

/// Mutable context handed to the activity manager and every behavior hook.
pub struct World<'a> {
    pub state: &'a mut GameState,
    pub env: GameEnv<'a>,
    narrator: Option<&'a mut dyn NarrationSink>,
}

impl<'a> World<'a> {
    pub fn new(state: &'a mut GameState, env: GameEnv<'a>) -> Self {
        Self {
            state,
            env,
            narrator: None,
        }
    }

    pub fn with_narrator(mut self, narrator: &'a mut dyn NarrationSink) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn config(&self) -> &'a GameConfig {
        self.env.config()
    }

    pub fn turn_number(&self) -> u64 {
        self.state.turn.turn_number
    }

    /// Sends a message to the narration sink. Silently dropped when none is attached.
    pub fn narrate(&mut self, message: impl Into<String>) {
        if let Some(narrator) = self.narrator.as_deref_mut() {
            narrator.narrate(message.into());
        }
    }
}
