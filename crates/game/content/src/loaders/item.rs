//! Item catalog loader.

use std::collections::HashMap;
use std::path::Path;

use delve_core::{ItemDefinition, ItemHandle, ItemOracle, Recipe, RecipeId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// On-disk layout of an item catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemCatalogFile {
    pub items: Vec<ItemDefinition>,
    pub recipes: Vec<Recipe>,
}

/// Item and recipe definitions, keyed for lookup.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<ItemHandle, ItemDefinition>,
    recipes: HashMap<RecipeId, Recipe>,
}

impl ItemCatalog {
    /// Parses a RON catalog.
    ///
    /// Duplicate handles or recipe IDs are rejected, as are recipes that
    /// reference items the catalog does not define.
    pub fn from_ron(content: &str) -> LoadResult<Self> {
        let file: ItemCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut catalog = Self::default();
        for item in file.items {
            let handle = item.handle;
            if catalog.items.insert(handle, item).is_some() {
                anyhow::bail!("Duplicate item handle {:?}", handle);
            }
        }
        for recipe in file.recipes {
            let referenced = recipe.ingredients.iter().chain(Some(&recipe.product));
            for handle in referenced {
                if !catalog.items.contains_key(handle) {
                    anyhow::bail!("Recipe {:?} references unknown item {:?}", recipe.id, handle);
                }
            }
            let id = recipe.id;
            if catalog.recipes.insert(id, recipe).is_some() {
                anyhow::bail!("Duplicate recipe id {:?}", id);
            }
        }

        tracing::debug!(
            items = catalog.items.len(),
            recipes = catalog.recipes.len(),
            "loaded item catalog"
        );
        Ok(catalog)
    }

    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::from_ron(&content)
    }

    /// The catalog shipped with the crate.
    pub fn load_embedded() -> LoadResult<Self> {
        Self::from_ron(include_str!("../../data/items.ron"))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    /// Looks an item up by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&ItemDefinition> {
        self.items.values().find(|item| item.name == name)
    }
}

impl ItemOracle for ItemCatalog {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition> {
        self.items.get(&handle).cloned()
    }

    fn recipe(&self, id: RecipeId) -> Option<Recipe> {
        self.recipes.get(&id).cloned()
    }
}
