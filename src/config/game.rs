/// Game configuration constants.
///
/// This module defines the main gameplay parameters such as board dimensions,
/// shooting cooldown, bullet timing and bomb blast radius.
use std::time::Duration;

/// Number of rows of the board when none is given on the command line.
pub const BOARD_HEIGHT: usize = 20;

/// Number of columns of the board when none is given on the command line.
pub const BOARD_WIDTH: usize = 20;

/// Difficulty used for the first generated board.
pub const DEFAULT_DIFFICULTY: u8 = 1;

/// Maximum number of tanks on the board (one per corner).
pub const MAX_PLAYERS: usize = 4;

/// Cells a tank covers per move.
pub const TANK_SPEED: usize = 1;

/// Lives given to a freshly registered player.
pub const STARTING_LIVES: u8 = 3;

/// Minimum time between two shots of the same tank.
pub const SHOOT_COOLDOWN: Duration = Duration::from_secs(4);

/// Distance covered by a bullet per unit of delta time (in cells).
pub const BULLET_SPEED: f64 = 0.25;

/// Interval between two steps of a bullet.
pub const BULLET_TICK: Duration = Duration::from_millis(500);

/// Steps after which a bullet is retired even if it never hit anything.
pub const MAX_BULLET_STEPS: u32 = 240;

/// Manhattan radius of a bomb blast.
pub const BOMB_RADIUS: usize = 10;

/// Base of the bomb cap; the cap for a board is `BOMB_CAP_BASE + difficulty`.
pub const BOMB_CAP_BASE: usize = 3;

/// Period of the elapsed-time clock served by `/time`.
pub const CLOCK_INTERVAL: Duration = Duration::from_secs(1);
