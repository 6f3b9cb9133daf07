//! Shooting and bullet flight.
//!
//! `shoot` puts a bullet on the board; `step_bullet` moves one bullet by one
//! tick and resolves what it runs into. The caller decides when ticks happen.

use std::time::Instant;

use log::{debug, info, warn};

use crate::config::game::MAX_BULLET_STEPS;
use crate::game::board::Board;
use crate::game::entities::Bullet;
use crate::game::error::GameError;
use crate::game::systems::{respawn_player, trigger_bomb};
use crate::game::types::{BulletId, PlayerId, Position, Tile};

/// Result of one bullet tick. Anything but `Flying` means the bullet is gone
/// from the board.
#[derive(Debug, Clone, PartialEq)]
pub enum BulletStep {
    Flying,
    /// The bullet was no longer on the board.
    Vanished,
    OutOfBounds,
    /// Retired after `MAX_BULLET_STEPS` steps.
    Expired,
    Collided { other: BulletId },
    HitWall { at: Position, tile: Tile },
    Detonated { at: Position, removed: Vec<PlayerId> },
    HitTank { target: PlayerId, shooter: PlayerId, high_score: Option<u32> },
}

impl BulletStep {
    pub fn is_flying(&self) -> bool {
        matches!(self, BulletStep::Flying)
    }
}

/// Fire from the tank's cell towards its facing direction.
///
/// Does nothing while the 4 s cooldown runs. A tank facing the edge of the
/// board still spends its shot, but no bullet appears.
pub fn shoot(
    board: &mut Board,
    player_id: PlayerId,
    now: Instant,
) -> Result<Option<BulletId>, GameError> {
    let tank = board.tank(player_id).ok_or(GameError::UnknownPlayer(player_id))?;
    if !tank.can_shoot(now) {
        debug!("[Board] Player {} is on cooldown", player_id);
        return Ok(None);
    }
    let origin = board.ahead_of(tank);
    let direction = tank.direction;

    board.tank_mut(player_id)?.mark_shot(now);
    let Some(origin) = origin else {
        debug!("[Board] Player {} fired off the board", player_id);
        return Ok(None);
    };

    let bullet = Bullet::new(origin, direction, player_id);
    let id = bullet.id;
    debug!(
        "[Board] Player {} fired bullet {} {:?} from ({}, {})",
        player_id, id, direction, origin.x, origin.y
    );
    board.bullets.push(bullet);
    Ok(Some(id))
}

/// Advance a bullet by `speed * delta_time` and resolve, in order: leaving
/// the board, meeting another bullet, hitting a wall, hitting a tank.
pub fn step_bullet(board: &mut Board, bullet_id: BulletId, delta_time: f64) -> BulletStep {
    let Some(index) = board.bullets.iter().position(|b| b.id == bullet_id) else {
        return BulletStep::Vanished;
    };

    if board.bullets[index].steps >= MAX_BULLET_STEPS {
        retire(board, bullet_id);
        return BulletStep::Expired;
    }

    board.bullets[index].advance(delta_time);
    let bullet = board.bullets[index].clone();

    let Some(cell) = bullet.cell(board.height, board.width) else {
        retire(board, bullet_id);
        return BulletStep::OutOfBounds;
    };

    let other = board
        .bullets
        .iter()
        .find(|b| b.id != bullet_id && b.active && b.same_spot(&bullet));
    if let Some(other) = other {
        let other = other.id;
        retire(board, bullet_id);
        retire(board, other);
        debug!("[Board] Bullets {} and {} collided at ({}, {})", bullet_id, other, cell.x, cell.y);
        return BulletStep::Collided { other };
    }

    match board.tile_at(cell) {
        Some(Tile::Unbreakable) => {
            retire(board, bullet_id);
            return BulletStep::HitWall { at: cell, tile: Tile::Unbreakable };
        }
        Some(tile) if tile.is_destructible() => {
            board.set_tile(cell, Tile::Empty);
            retire(board, bullet_id);
            if tile == Tile::Bomb {
                let removed = trigger_bomb(board, cell);
                return BulletStep::Detonated { at: cell, removed };
            }
            return BulletStep::HitWall { at: cell, tile };
        }
        _ => {}
    }

    if let Some(target) = board.tank_at(cell).map(|t| t.id()) {
        retire(board, bullet_id);
        if let Err(err) = respawn_player(board, target) {
            warn!("[Board] Could not respawn player {}: {}", target, err);
        }
        let high_score = credit_elimination(board, bullet.owner, target);
        info!("[Board] Player {} hit player {} at ({}, {})", bullet.owner, target, cell.x, cell.y);
        return BulletStep::HitTank { target, shooter: bullet.owner, high_score };
    }

    BulletStep::Flying
}

/// Score one elimination for `shooter`. Hitting yourself scores nothing, and
/// neither does a shooter that has left the board. Returns the new high score
/// when it moved.
fn credit_elimination(board: &mut Board, shooter: PlayerId, target: PlayerId) -> Option<u32> {
    if shooter == target {
        return None;
    }
    let tank = board.tank_mut(shooter).ok()?;
    tank.player.record_elimination().then_some(tank.player.high_score)
}

/// Deactivate a bullet and drop it from the live collection.
fn retire(board: &mut Board, bullet_id: BulletId) {
    if let Some(index) = board.bullets.iter().position(|b| b.id == bullet_id) {
        let mut bullet = board.bullets.remove(index);
        bullet.destroy();
        debug!(
            "[Board] Bullet {} retired after {} steps ({:?})",
            bullet_id,
            bullet.steps,
            bullet.created_at.elapsed()
        );
    }
}
