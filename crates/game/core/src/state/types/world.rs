use std::collections::BTreeSet;

use super::Position;

/// Static tile layout: bounds plus impassable wall tiles.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldMap {
    pub width: u32,
    pub height: u32,
    walls: BTreeSet<Position>,
}

impl WorldMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            walls: BTreeSet::new(),
        }
    }

    /// Builds a map whose outermost ring is wall.
    pub fn bordered(width: u32, height: u32) -> Self {
        let mut map = Self::new(width, height);
        for x in 0..width as i32 {
            map.add_wall(Position::new(x, 0));
            map.add_wall(Position::new(x, height as i32 - 1));
        }
        for y in 0..height as i32 {
            map.add_wall(Position::new(0, y));
            map.add_wall(Position::new(width as i32 - 1, y));
        }
        map
    }

    pub fn add_wall(&mut self, position: Position) {
        self.walls.insert(position);
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.walls.contains(&position)
    }

    /// In bounds and not a wall. Occupancy is checked by [`crate::GameState::can_enter`].
    pub fn is_walkable(&self, position: Position) -> bool {
        self.contains(position) && !self.is_wall(position)
    }
}
