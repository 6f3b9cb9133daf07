//! Bomb blast system.

use log::info;

use crate::config::game::BOMB_RADIUS;
use crate::game::board::Board;
use crate::game::systems::remove_player;
use crate::game::types::{PlayerId, Position, Tile};

/// Blow up everything within Manhattan distance `BOMB_RADIUS` of `center`:
/// breakable walls become empty and tanks are removed from the roster
/// outright. Other bombs and unbreakable walls are left alone.
///
/// Returns the ids of the removed players.
pub fn trigger_bomb(board: &mut Board, center: Position) -> Vec<PlayerId> {
    let x_end = (center.x + BOMB_RADIUS).min(board.height - 1);
    let x_range = center.x.saturating_sub(BOMB_RADIUS)..=x_end;
    for x in x_range {
        let y_end = (center.y + BOMB_RADIUS).min(board.width - 1);
        let y_range = center.y.saturating_sub(BOMB_RADIUS)..=y_end;
        for y in y_range {
            let pos = Position::new(x, y);
            if pos.manhattan(center) <= BOMB_RADIUS && board.tile_at(pos) == Some(Tile::Breakable) {
                board.set_tile(pos, Tile::Empty);
            }
        }
    }

    let removed: Vec<PlayerId> = board
        .tanks
        .iter()
        .filter(|t| t.pos.manhattan(center) <= BOMB_RADIUS)
        .map(|t| t.id())
        .collect();
    for player_id in &removed {
        remove_player(board, *player_id);
    }

    info!("[Board] Bomb at ({}, {}) removed players {:?}", center.x, center.y, removed);
    removed
}
