use std::time::Instant;

use uuid::Uuid;

use crate::config::game::BULLET_SPEED;
use crate::game::types::{BulletId, Direction, PlayerId, Position};

/// A projectile in flight.
///
/// Coordinates are continuous: `x` is the row and `y` the column, both in
/// cells. Only the axis of travel ever carries a fractional part.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: BulletId,
    pub x: f64,
    pub y: f64,
    pub direction: Direction,
    pub speed: f64,
    pub active: bool,
    /// Tank that fired it.
    pub owner: PlayerId,
    pub created_at: Instant,
    /// Steps taken so far.
    pub steps: u32,
}

impl Bullet {
    pub fn new(origin: Position, direction: Direction, owner: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: origin.x as f64,
            y: origin.y as f64,
            direction,
            speed: BULLET_SPEED,
            active: true,
            owner,
            created_at: Instant::now(),
            steps: 0,
        }
    }

    /// Move `speed * delta_time` cells along the bullet's direction.
    pub fn advance(&mut self, delta_time: f64) {
        if !self.active {
            return;
        }
        let (dx, dy) = self.direction.delta();
        let distance = self.speed * delta_time;
        self.x += dx as f64 * distance;
        self.y += dy as f64 * distance;
        self.steps += 1;
    }

    pub fn destroy(&mut self) {
        self.active = false;
        self.speed = 0.0;
    }

    /// The grid cell the bullet currently occupies, or `None` once it has
    /// left a `height` x `width` board.
    ///
    /// A bullet belongs to the nearest cell; on an exact half it already
    /// counts as being in the cell it is heading into.
    pub fn cell(&self, height: usize, width: usize) -> Option<Position> {
        let (dx, dy) = self.direction.delta();
        let x = round_along(self.x, dx);
        let y = round_along(self.y, dy);
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < height && y < width).then_some(Position { x, y })
    }

    pub fn same_spot(&self, other: &Bullet) -> bool {
        self.x == other.x && self.y == other.y
    }
}

fn round_along(value: f64, heading: isize) -> f64 {
    if heading > 0 {
        (value + 0.5).floor()
    } else if heading < 0 {
        (value - 0.5).ceil()
    } else {
        value.round()
    }
}
