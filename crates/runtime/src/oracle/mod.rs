//! Runtime bundle of the static content oracles.
//!
//! [`ContentOracles`] owns the loaded configuration, activity table and item
//! catalog, and lends them out as a [`GameEnv`] for each call into the core.
//! The data is immutable at runtime; dynamic state lives in
//! [`delve_core::GameState`].
use std::path::Path;

use delve_content::{ActivityTable, ConfigLoader, ItemCatalog, LoadResult};
use delve_core::{GameConfig, GameEnv};

/// Owns every read-only collaborator the core consumes.
#[derive(Clone, Debug)]
pub struct ContentOracles {
    config: GameConfig,
    activities: ActivityTable,
    items: ItemCatalog,
}

impl ContentOracles {
    pub fn new(config: GameConfig, activities: ActivityTable, items: ItemCatalog) -> Self {
        Self {
            config,
            activities,
            items,
        }
    }

    /// Loads the content shipped inside `delve-content`.
    pub fn load_embedded() -> LoadResult<Self> {
        Ok(Self::new(
            ConfigLoader::load_embedded()?,
            ActivityTable::load_embedded()?,
            ItemCatalog::load_embedded()?,
        ))
    }

    /// Embedded content with the configuration read from `path`.
    pub fn with_config_file(path: &Path) -> LoadResult<Self> {
        let mut oracles = Self::load_embedded()?;
        oracles.config = ConfigLoader::load(path)?;
        Ok(oracles)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn activities(&self) -> &ActivityTable {
        &self.activities
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    /// Converts the bundle into the environment handed to behaviors.
    pub fn game_env(&self) -> GameEnv<'_> {
        GameEnv::new(&self.config)
            .with_activities(&self.activities)
            .with_items(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::ActivityKind;

    #[test]
    fn embedded_bundle_serves_activity_rows() {
        let oracles = ContentOracles::load_embedded().unwrap();
        let env = oracles.game_env();
        assert_eq!(env.activity_info(ActivityKind::Rest).total_required_ap, 1000);
        assert_eq!(env.config().player_moves_per_turn, 100);
        assert!(env.items().is_ok());
    }
}
