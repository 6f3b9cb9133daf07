//! Player placement system.
//!
//! Tanks join on the inset corners of the board and respawn on a random one.

use log::{debug, info};
use rand::Rng;

use crate::config::game::MAX_PLAYERS;
use crate::game::board::Board;
use crate::game::entities::{Player, Tank, start_position};
use crate::game::error::GameError;
use crate::game::types::{PlayerId, Position};

/// Place a new tank on the first free corner slot, in the order top-left,
/// top-right, bottom-left, bottom-right. The spawn cell and its neighbours
/// are cleared whatever the generator put there.
pub fn insert_player(board: &mut Board, player: Player) -> Result<Position, GameError> {
    let slot = (0..MAX_PLAYERS)
        .find(|slot| !board.tanks.iter().any(|t| t.slot == *slot))
        .ok_or(GameError::BoardFull)?;

    let pos = start_position(slot, board.height, board.width);
    board.clear_spawn(pos, true);
    info!(
        "[Board] Player {} ({}) placed in slot {} at ({}, {})",
        player.id, player.name, slot, pos.x, pos.y
    );
    board.tanks.push(Tank::new(player, slot, pos));
    Ok(pos)
}

/// Move a tank to one of the four corners picked at random, clearing the
/// landing area. Whether another tank already stands there is not checked.
pub fn respawn_player(board: &mut Board, player_id: PlayerId) -> Result<Position, GameError> {
    let corner = board.rng.random_range(0..MAX_PLAYERS);
    let pos = start_position(corner, board.height, board.width);
    board.clear_spawn(pos, false);
    board.tank_mut(player_id)?.pos = pos;
    debug!("[Board] Player {} respawned at ({}, {})", player_id, pos.x, pos.y);
    Ok(pos)
}

/// Take a tank off the board for good, freeing its slot.
pub fn remove_player(board: &mut Board, player_id: PlayerId) -> Option<Tank> {
    let index = board.tanks.iter().position(|t| t.id() == player_id)?;
    let mut tank = board.tanks.remove(index);
    tank.is_alive = false;
    debug!("[Board] Player {} left slot {}", player_id, tank.slot);
    Some(tank)
}
