use crate::state::{ItemHandle, RecipeId};

/// Read-only item and recipe definitions.
pub trait ItemOracle: Send + Sync {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition>;

    fn recipe(&self, id: RecipeId) -> Option<Recipe>;
}

/// Item definition with common fields and type-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub handle: ItemHandle,
    pub name: String,
    pub kind: ItemKind,
}

impl ItemDefinition {
    pub fn new(handle: ItemHandle, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            handle,
            name: name.into(),
            kind,
        }
    }
}

/// Item type with type-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Used up on use; restores HP.
    Consumable { heal: u32 },

    /// Read over several turns; teaches a recipe.
    Book { teaches: RecipeId },

    /// Crafting input with no direct use.
    Material,
}

/// Crafting recipe: every ingredient is consumed to produce one product.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub ingredients: Vec<ItemHandle>,
    pub product: ItemHandle,
}
