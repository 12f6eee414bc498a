use arrayvec::ArrayVec;
use bitflags::bitflags;
use bounded_vector::BoundedVec;

use super::{EntityId, Position, ResourceMeter, RoamingState};
use crate::config::GameConfig;

/// Aggregate state for every entity in the map.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EntitiesState {
    pub actors: BoundedVec<ActorState, 0, { GameConfig::MAX_ACTORS }>,
    pub props: ArrayVec<PropState, { GameConfig::MAX_PROPS }>,
    pub items: ArrayVec<ItemState, { GameConfig::MAX_WORLD_ITEMS }>,
}

impl EntitiesState {
    /// Returns a reference to an actor by ID.
    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    /// Returns a mutable reference to an actor by ID.
    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    /// Returns the player if it exists and is still alive.
    pub fn living_player(&self) -> Option<&ActorState> {
        self.actors
            .iter()
            .find(|actor| actor.is_player() && actor.is_alive())
    }

    /// Returns the living actor standing on `position`, if any.
    pub fn living_actor_at(&self, position: Position) -> Option<&ActorState> {
        self.actors
            .iter()
            .find(|actor| actor.position == position && actor.is_alive())
    }

    /// IDs of every non-player actor, in registry order.
    pub fn npc_ids(&self) -> Vec<EntityId> {
        self.actors
            .iter()
            .filter(|actor| !actor.is_player())
            .map(|actor| actor.id)
            .collect()
    }

    pub fn prop(&self, id: EntityId) -> Option<&PropState> {
        self.props.iter().find(|prop| prop.id == id)
    }

    pub fn prop_at(&self, position: Position) -> Option<&PropState> {
        self.props.iter().find(|prop| prop.position == position)
    }

    pub fn prop_at_mut(&mut self, position: Position) -> Option<&mut PropState> {
        self.props.iter_mut().find(|prop| prop.position == position)
    }

    /// First ground item lying on `position`.
    pub fn item_at(&self, position: Position) -> Option<&ItemState> {
        self.items.iter().find(|item| item.position == position)
    }

    /// Removes a ground item by ID, returning it.
    pub fn take_item(&mut self, id: EntityId) -> Option<ItemState> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}

/// Allegiance used to decide who counts as an enemy.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    /// The player's side.
    Player,
    /// Attacks the player on sight.
    Hostile,
    /// Shopkeepers, quest givers, wandering critters.
    #[default]
    Neutral,
}

impl Faction {
    pub fn is_hostile_to(self, other: Faction) -> bool {
        matches!(
            (self, other),
            (Faction::Player, Faction::Hostile) | (Faction::Hostile, Faction::Player)
        )
    }
}

/// Per-actor action point pool. Refilled at the start of each AI phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApPool {
    pub current: u32,
    pub max: u32,
}

impl ApPool {
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub const fn can_afford(&self, cost: u32) -> bool {
        self.current >= cost
    }

    /// Withdraws `cost` when affordable. Leaves the pool untouched otherwise.
    pub fn spend(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.current -= cost;
        true
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }
}

/// Complete actor state: identity, placement, vitals and belongings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorState {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    pub faction: Faction,
    pub hp: ResourceMeter,
    /// Flat damage dealt per successful attack.
    pub attack: u32,
    /// `None` means the actor declares no AP capacity; duration math then uses the configured default.
    pub ap: Option<ApPool>,
    pub inventory: InventoryState,
    pub known_recipes: Vec<RecipeId>,
    pub dialogue: Option<String>,
    /// Present only for AI-controlled actors.
    pub roaming: Option<RoamingState>,
}

impl ActorState {
    pub fn new(id: EntityId, name: impl Into<String>, position: Position, faction: Faction) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            faction,
            hp: ResourceMeter::default(),
            attack: 1,
            ap: None,
            inventory: InventoryState::default(),
            known_recipes: Vec::new(),
            dialogue: None,
            roaming: None,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp.current > 0
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.id.is_player()
    }

    pub fn is_hostile_to(&self, other: &ActorState) -> bool {
        self.faction.is_hostile_to(other.faction)
    }

    /// Declared AP capacity, if any.
    pub fn max_ap(&self) -> Option<u32> {
        self.ap.map(|pool| pool.max)
    }

    pub fn knows_recipe(&self, recipe: RecipeId) -> bool {
        self.known_recipes.contains(&recipe)
    }

    pub fn with_hp(mut self, hp: ResourceMeter) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_attack(mut self, attack: u32) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_ap(mut self, max: u32) -> Self {
        self.ap = Some(ApPool::full(max));
        self
    }

    pub fn with_dialogue(mut self, line: impl Into<String>) -> Self {
        self.dialogue = Some(line.into());
        self
    }

    pub fn with_roaming(mut self, roaming: RoamingState) -> Self {
        self.roaming = Some(roaming);
        self
    }

    pub fn with_item(mut self, item: ItemHandle) -> Self {
        // Builder is used for scenario setup; a full bag simply drops the extra item.
        let _ = self.inventory.add(item);
        self
    }
}

/// Error returned when an inventory has no free slot left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("inventory is full ({capacity} slots)")]
pub struct InventoryFull {
    pub capacity: usize,
}

/// Fixed-capacity bag of item handles.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct InventoryState {
    pub items: ArrayVec<ItemHandle, { GameConfig::MAX_INVENTORY_SLOTS }>,
}

impl InventoryState {
    pub fn add(&mut self, item: ItemHandle) -> Result<(), InventoryFull> {
        self.items.try_push(item).map_err(|_| InventoryFull {
            capacity: GameConfig::MAX_INVENTORY_SLOTS,
        })
    }

    pub fn contains(&self, item: ItemHandle) -> bool {
        self.items.contains(&item)
    }

    pub fn count(&self, item: ItemHandle) -> usize {
        self.items.iter().filter(|&&held| held == item).count()
    }

    /// Removes a single copy of `item`. Returns false if none was held.
    pub fn remove_one(&mut self, item: ItemHandle) -> bool {
        match self.items.iter().position(|&held| held == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }
}

bitflags! {
    /// Runtime markers carried by props. Doors toggle the blocking bits as they open and close.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PropFlags: u8 {
        const OPEN            = 1 << 0;
        const BLOCKS_MOVEMENT = 1 << 1;
        const BLOCKS_VIEW     = 1 << 2;
        const ACTIVE          = 1 << 3;
    }
}

/// Non-actor entities such as doors, switches, or portals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropState {
    pub id: EntityId,
    pub position: Position,
    pub kind: PropKind,
    pub flags: PropFlags,
    /// Actor currently working at this prop (workbenches).
    pub claimed_by: Option<EntityId>,
}

impl PropState {
    pub fn new(id: EntityId, position: Position, kind: PropKind, flags: PropFlags) -> Self {
        Self {
            id,
            position,
            kind,
            flags,
            claimed_by: None,
        }
    }

    pub fn door(id: EntityId, position: Position, open: bool) -> Self {
        let flags = if open {
            PropFlags::OPEN
        } else {
            PropFlags::BLOCKS_MOVEMENT | PropFlags::BLOCKS_VIEW
        };
        Self::new(id, position, PropKind::Door, flags)
    }

    pub fn is_workbench(&self) -> bool {
        matches!(self.kind, PropKind::Workbench)
    }

    pub fn is_door(&self) -> bool {
        matches!(self.kind, PropKind::Door)
    }

    pub fn is_open(&self) -> bool {
        self.flags.contains(PropFlags::OPEN)
    }

    pub fn blocks_movement(&self) -> bool {
        self.flags.contains(PropFlags::BLOCKS_MOVEMENT)
    }

    pub fn blocks_view(&self) -> bool {
        self.flags.contains(PropFlags::BLOCKS_VIEW)
    }

    /// Opens a door: sets `OPEN` and drops both blocking markers.
    pub fn open(&mut self) {
        self.flags.insert(PropFlags::OPEN);
        self.flags
            .remove(PropFlags::BLOCKS_MOVEMENT | PropFlags::BLOCKS_VIEW);
    }

    /// Closes a door: clears `OPEN` and restores both blocking markers.
    pub fn close(&mut self) {
        self.flags.remove(PropFlags::OPEN);
        self.flags
            .insert(PropFlags::BLOCKS_MOVEMENT | PropFlags::BLOCKS_VIEW);
    }
}

/// Enumerates the prop categories behaviors know how to interact with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropKind {
    Door,
    Workbench,
    Portal { destination: Position },
    Switch,
    Sign { text: String },
}

/// Items that exist on the ground (not inside inventories).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemState {
    pub id: EntityId,
    pub position: Position,
    pub handle: ItemHandle,
}

impl ItemState {
    pub fn new(id: EntityId, position: Position, handle: ItemHandle) -> Self {
        Self {
            id,
            position,
            handle,
        }
    }
}

/// Reference to an item definition stored outside the core (lookup via `ItemOracle`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHandle(pub u32);

/// Reference to a crafting recipe (lookup via `ItemOracle`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipeId(pub u32);
