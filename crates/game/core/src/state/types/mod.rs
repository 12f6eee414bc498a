pub mod ai;
pub mod common;
pub mod entities;
pub mod world;

pub use ai::{RoamingState, RoamingSubState};
pub use common::{Direction, EntityId, Position, ResourceMeter};
pub use entities::{
    ActorState, ApPool, EntitiesState, Faction, InventoryFull, InventoryState, ItemHandle,
    ItemState, PropFlags, PropKind, PropState, RecipeId,
};
pub use world::WorldMap;
