use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::error::GameError;

/// Identifier assigned to a player by the credential store.
pub type PlayerId = u32;

/// Identifier of a bullet in flight.
pub type BulletId = Uuid;

/// Grid coordinates: `x` is the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The neighbouring position one step in `direction`, if it stays inside
    /// a `height` x `width` board.
    pub fn step(&self, direction: Direction, height: usize, width: usize) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < height && y < width).then_some(Position { x, y })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a WASD key (either case) to a direction.
    pub fn from_key(key: char) -> Option<Direction> {
        match key.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }

    /// Row/column offset of one step.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Terrain of a grid cell. The discriminants are the wire/tile codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Empty = 0,
    Breakable = 1,
    Unbreakable = 2,
    Bomb = 3,
}

impl Tile {
    pub fn is_wall(self) -> bool {
        self != Tile::Empty
    }

    pub fn is_destructible(self) -> bool {
        matches!(self, Tile::Breakable | Tile::Bomb)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub tile: Tile,
    pub is_start: bool,
}

pub type Grid = Vec<Vec<Cell>>;

/// Board difficulty, always within 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(level: u8) -> Result<Self, GameError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Difficulty(level))
        } else {
            Err(GameError::InvalidDifficulty(level))
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Difficulty::new(level)
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> u8 {
        difficulty.0
    }
}
