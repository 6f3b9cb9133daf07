//! Tank movement system.
//!
//! This module handles moving tanks on the grid.

use log::debug;

use crate::game::board::Board;
use crate::game::error::GameError;
use crate::game::types::{Direction, PlayerId, Position, Tile};

/// Turn the tank towards the direction of `key` (WASD, any case) and try to
/// move `speed` cells that way. Returns the tank's position afterwards.
///
/// Any other key keeps the current facing and still moves. A step only
/// happens onto an empty tile inside the board; otherwise the tank just turns.
/// Other tanks do not block.
pub fn move_tank(board: &mut Board, player_id: PlayerId, key: char) -> Result<Position, GameError> {
    let (height, width) = (board.height, board.width);
    let tank = board.tank(player_id).ok_or(GameError::UnknownPlayer(player_id))?;
    let direction = Direction::from_key(key).unwrap_or(tank.direction);

    let mut pos = tank.pos;
    for _ in 0..tank.speed {
        match pos.step(direction, height, width) {
            Some(next) if board.tile_at(next) == Some(Tile::Empty) => pos = next,
            _ => break,
        }
    }

    let tank = board.tank_mut(player_id)?;
    tank.direction = direction;
    tank.pos = pos;
    debug!("[Board] Player {} moved {:?} to ({}, {})", player_id, direction, pos.x, pos.y);
    Ok(pos)
}
