//! Authoritative game state representation.
//!
//! This module owns the data structures that describe entities, the tile map
//! and turn bookkeeping. Behaviors mutate it through the [`crate::World`]
//! context handed to them by the activity manager.
pub mod error;
pub mod turn;
pub mod types;

pub use error::StateError;
pub use turn::{ApLedger, TurnLedger, TurnPhase};
pub use types::{
    ActorState, ApPool, Direction, EntitiesState, EntityId, Faction, InventoryFull,
    InventoryState, ItemHandle, ItemState, Position, PropFlags, PropKind, PropState, RecipeId,
    ResourceMeter, RoamingState, RoamingSubState, WorldMap,
};

use crate::config::GameConfig;

/// Canonical snapshot of the game state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GameState {
    /// Sequential entity ID allocator (monotonically increasing).
    ///
    /// Never reused. ID 0 is reserved for the player.
    next_entity_id: u32,

    /// Turn Ledger: player moves, phase and turn number.
    pub turn: TurnLedger,
    /// All entities tracked in the level: actors, props, items.
    pub entities: EntitiesState,
    /// Static layout the entities live on.
    pub world: WorldMap,
}

impl GameState {
    /// Creates an empty level with the given layout.
    pub fn new(world: WorldMap, player_moves: u32) -> Self {
        Self {
            next_entity_id: 1,
            turn: TurnLedger::new(player_moves),
            entities: EntitiesState::default(),
            world,
        }
    }

    /// Allocates a new unique EntityId, skipping the reserved player slot.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        if self.next_entity_id == EntityId::PLAYER.0 {
            self.next_entity_id += 1;
        }
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.saturating_add(1);
        id
    }

    /// Registers an actor.
    ///
    /// # Errors
    ///
    /// Fails when the ID is already taken, the position lies outside the map,
    /// or the actor list is at capacity.
    pub fn add_actor(&mut self, actor: ActorState) -> Result<EntityId, StateError> {
        if self.entities.actor(actor.id).is_some() {
            return Err(StateError::DuplicateEntity(actor.id));
        }
        self.check_bounds(actor.position)?;

        let id = actor.id;
        self.entities
            .actors
            .push(actor)
            .map_err(|_| StateError::ActorListFull {
                max: GameConfig::MAX_ACTORS,
            })?;
        self.next_entity_id = self.next_entity_id.max(id.0.saturating_add(1));
        Ok(id)
    }

    pub fn add_prop(&mut self, prop: PropState) -> Result<EntityId, StateError> {
        self.check_bounds(prop.position)?;
        let id = prop.id;
        self.entities
            .props
            .try_push(prop)
            .map_err(|_| StateError::PropListFull {
                max: GameConfig::MAX_PROPS,
            })?;
        self.next_entity_id = self.next_entity_id.max(id.0.saturating_add(1));
        Ok(id)
    }

    pub fn add_item(&mut self, item: ItemState) -> Result<EntityId, StateError> {
        self.check_bounds(item.position)?;
        let id = item.id;
        self.entities
            .items
            .try_push(item)
            .map_err(|_| StateError::ItemListFull {
                max: GameConfig::MAX_WORLD_ITEMS,
            })?;
        self.next_entity_id = self.next_entity_id.max(id.0.saturating_add(1));
        Ok(id)
    }

    /// Determines whether a tile can be entered: walkable terrain, no blocking prop, no living occupant.
    pub fn can_enter(&self, position: Position) -> bool {
        if !self.world.is_walkable(position) {
            return false;
        }
        if self
            .entities
            .prop_at(position)
            .is_some_and(PropState::blocks_movement)
        {
            return false;
        }
        self.entities.living_actor_at(position).is_none()
    }

    /// Living actors hostile to `actor` within `radius` tiles (Chebyshev).
    pub fn hostiles_near(&self, actor: &ActorState, radius: u32) -> usize {
        self.entities
            .actors
            .iter()
            .filter(|other| other.id != actor.id && other.is_alive())
            .filter(|other| other.is_hostile_to(actor))
            .filter(|other| other.position.chebyshev_distance(actor.position) <= radius)
            .count()
    }

    /// Refills every AI actor's AP pool to its maximum.
    pub fn refill_actor_ap(&mut self) {
        for actor in self.entities.actors.iter_mut() {
            if actor.is_player() {
                continue;
            }
            if let Some(pool) = actor.ap.as_mut() {
                pool.refill();
            }
        }
    }

    fn check_bounds(&self, position: Position) -> Result<(), StateError> {
        if self.world.contains(position) {
            Ok(())
        } else {
            Err(StateError::PositionOutOfBounds {
                position,
                width: self.world.width,
                height: self.world.height,
            })
        }
    }
}

impl ApLedger for GameState {
    fn debit_player_moves(&mut self, amount: u32) {
        self.turn.debit_player_moves(amount);
    }

    fn debit_actor_ap(&mut self, actor: EntityId, amount: u32) -> bool {
        self.entities
            .actor_mut(actor)
            .and_then(|actor| actor.ap.as_mut())
            .is_some_and(|pool| pool.spend(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        let mut state = GameState::new(WorldMap::bordered(8, 8), 100);
        state
            .add_actor(ActorState::new(
                EntityId::PLAYER,
                "hero",
                Position::new(2, 2),
                Faction::Player,
            ))
            .unwrap();
        state
    }

    #[test]
    fn can_enter_respects_walls_doors_and_occupants() {
        let mut state = state();
        assert!(!state.can_enter(Position::new(0, 3)));
        assert!(!state.can_enter(Position::new(2, 2)));
        assert!(state.can_enter(Position::new(3, 3)));

        let id = state.allocate_entity_id();
        state
            .add_prop(PropState::door(id, Position::new(3, 3), false))
            .unwrap();
        assert!(!state.can_enter(Position::new(3, 3)));
    }

    #[test]
    fn duplicate_actor_is_rejected() {
        let mut state = state();
        let err = state
            .add_actor(ActorState::new(
                EntityId::PLAYER,
                "clone",
                Position::new(4, 4),
                Faction::Player,
            ))
            .unwrap_err();
        assert_eq!(err, StateError::DuplicateEntity(EntityId::PLAYER));
    }

    #[test]
    fn allocated_ids_skip_registered_ones() {
        let mut state = state();
        state
            .add_actor(ActorState::new(EntityId(5), "rat", Position::new(4, 4), Faction::Hostile))
            .unwrap();
        assert_eq!(state.allocate_entity_id(), EntityId(6));
    }

    #[test]
    fn ai_debit_fails_without_pool_or_funds() {
        let mut state = state();
        state
            .add_actor(
                ActorState::new(EntityId(3), "bat", Position::new(5, 5), Faction::Hostile)
                    .with_ap(100),
            )
            .unwrap();

        assert!(state.debit_actor_ap(EntityId(3), 100));
        assert!(!state.debit_actor_ap(EntityId(3), 1));
        assert!(!state.debit_actor_ap(EntityId::PLAYER, 1));
        assert!(!state.debit_actor_ap(EntityId(42), 1));

        state.refill_actor_ap();
        assert_eq!(state.entities.actor(EntityId(3)).unwrap().ap.unwrap().current, 100);
    }
}
