use std::time::Instant;

use crate::config::game::{SHOOT_COOLDOWN, TANK_SPEED};
use crate::game::entities::Player;
use crate::game::types::{Direction, PlayerId, Position};

/// A player's tank: the identity record plus everything positional.
#[derive(Debug, Clone)]
pub struct Tank {
    pub player: Player,
    pub pos: Position,
    pub direction: Direction,
    /// Cleared just before a bomb takes the tank off the board.
    pub is_alive: bool,
    /// Cells covered by one move.
    pub speed: usize,
    /// Corner slot taken at join time (0..4).
    pub slot: usize,
    last_shot: Option<Instant>,
}

impl Tank {
    pub fn new(player: Player, slot: usize, pos: Position) -> Self {
        Self {
            player,
            pos,
            direction: Direction::default(),
            is_alive: true,
            speed: TANK_SPEED,
            slot,
            last_shot: None,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.player.id
    }

    pub fn can_shoot(&self, now: Instant) -> bool {
        match self.last_shot {
            Some(last) => now.saturating_duration_since(last) >= SHOOT_COOLDOWN,
            None => true,
        }
    }

    pub fn mark_shot(&mut self, now: Instant) {
        self.last_shot = Some(now);
    }
}

/// Spawn cell of a corner slot: one cell inward from top-left, top-right,
/// bottom-left and bottom-right, in that order.
pub fn start_position(slot: usize, height: usize, width: usize) -> Position {
    match slot % 4 {
        0 => Position::new(1, 1),
        1 => Position::new(1, width - 2),
        2 => Position::new(height - 2, 1),
        _ => Position::new(height - 2, width - 2),
    }
}
