//! Demo level and the scripted hero that plays it.
//!
//! Two rooms split by a wall with a single closed door. The hero starts in
//! the west room next to a workbench with a primer and the ingredients for a
//! healing draught; rats roam the east room.
use std::collections::VecDeque;

use anyhow::Result;

use delve_core::{
    ActionRequest, ActorState, EntityId, Faction, GameConfig, GameState, ItemHandle, ItemState,
    Position, PropFlags, PropKind, PropState, RecipeId, ResourceMeter, RoamingState, WorldMap,
};

const WIDTH: u32 = 20;
const HEIGHT: u32 = 12;
const DIVIDER_X: i32 = 10;

pub const DOOR: Position = Position::new(DIVIDER_X, 5);
pub const HERO_START: Position = Position::new(3, 5);

const RATION: ItemHandle = ItemHandle(2);
const HERBALISM_PRIMER: ItemHandle = ItemHandle(3);
const HEALING_DRAUGHT: ItemHandle = ItemHandle(1);
const MOONPETAL: ItemHandle = ItemHandle(5);
const HEALING_RECIPE: RecipeId = RecipeId(1);

pub fn demo_level(config: &GameConfig) -> Result<GameState> {
    let mut world = WorldMap::bordered(WIDTH, HEIGHT);
    for y in 1..HEIGHT as i32 - 1 {
        if y != DOOR.y {
            world.add_wall(Position::new(DIVIDER_X, y));
        }
    }
    let mut state = GameState::new(world, config.player_moves_per_turn);

    state.add_actor(
        ActorState::new(EntityId::PLAYER, "hero", HERO_START, Faction::Player)
            .with_hp(ResourceMeter::new(8, 20))
            .with_attack(3)
            .with_ap(config.default_actor_ap)
            .with_item(HERBALISM_PRIMER)
            .with_item(MOONPETAL)
            .with_item(MOONPETAL),
    )?;

    let id = state.allocate_entity_id();
    state.add_prop(PropState::door(id, DOOR, false))?;
    let id = state.allocate_entity_id();
    state.add_prop(PropState::new(
        id,
        Position::new(4, 6),
        PropKind::Workbench,
        PropFlags::BLOCKS_MOVEMENT,
    ))?;
    let id = state.allocate_entity_id();
    state.add_prop(PropState::new(
        id,
        Position::new(2, 4),
        PropKind::Sign {
            text: "Mind the rats past the door.".into(),
        },
        PropFlags::empty(),
    ))?;
    let id = state.allocate_entity_id();
    state.add_item(ItemState::new(id, HERO_START, RATION))?;

    for position in [Position::new(15, 3), Position::new(16, 8)] {
        let id = state.allocate_entity_id();
        state.add_actor(
            ActorState::new(id, "rat", position, Faction::Hostile)
                .with_hp(ResourceMeter::full(4))
                .with_attack(1)
                .with_ap(config.default_actor_ap)
                .with_roaming(RoamingState::default()),
        )?;
    }

    Ok(state)
}

/// Queue of hero requests; once exhausted the hero waits.
#[derive(Clone, Debug)]
pub struct PlayerScript {
    queue: VecDeque<ActionRequest>,
}

impl PlayerScript {
    pub fn demo() -> Self {
        let hero = EntityId::PLAYER;
        let mut queue = VecDeque::from([
            ActionRequest::pick_up(hero),
            ActionRequest::read(hero, HERBALISM_PRIMER),
            ActionRequest::craft(hero, HEALING_RECIPE),
            ActionRequest::use_item(hero, HEALING_DRAUGHT),
            ActionRequest::interact(hero, Position::new(2, 4)),
        ]);
        for x in HERO_START.x + 1..DOOR.x {
            queue.push_back(ActionRequest::move_to(hero, Position::new(x, DOOR.y)));
        }
        queue.push_back(ActionRequest::open_door(hero, DOOR));
        queue.push_back(ActionRequest::rest(hero));
        Self { queue }
    }

    /// The hero's next request. A hero still busy with an activity issues none.
    pub fn next_request(&mut self, busy: bool) -> Option<ActionRequest> {
        if busy {
            return None;
        }
        Some(
            self.queue
                .pop_front()
                .unwrap_or_else(|| ActionRequest::wait(EntityId::PLAYER)),
        )
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}
