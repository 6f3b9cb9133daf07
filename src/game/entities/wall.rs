use serde::Serialize;

use crate::game::types::{Position, Tile};

/// A non-empty tile, as listed when the board is generated.
///
/// The grid stays authoritative; this is only an enumeration view of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Wall {
    pub pos: Position,
    pub tile: Tile,
}

impl Wall {
    pub fn new(pos: Position, tile: Tile) -> Self {
        Self { pos, tile }
    }

    pub fn is_destructible(&self) -> bool {
        self.tile.is_destructible()
    }

    pub fn is_bomb(&self) -> bool {
        self.tile == Tile::Bomb
    }
}
