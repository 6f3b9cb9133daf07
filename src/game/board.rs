//! The board: single authority over the grid, the tank roster, the wall list
//! and the bullets in flight.
//!
//! Gameplay lives in `game::systems`; this module owns the data, generation
//! and lookups.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::game::MAX_PLAYERS;
use crate::game::entities::{Bullet, Player, Tank, Wall, start_position};
use crate::game::error::GameError;
use crate::game::grid::{clear_surroundings, collect_walls, fill_grid, generate_grid};
use crate::game::systems::{insert_player, move_tank, shoot};
use crate::game::types::{BulletId, Difficulty, Grid, PlayerId, Position, Tile};

#[derive(Debug)]
pub struct Board {
    pub(crate) height: usize,
    pub(crate) width: usize,
    pub(crate) difficulty: Difficulty,
    pub(crate) grid: Grid,
    /// Ordered by join sequence.
    pub(crate) tanks: Vec<Tank>,
    pub(crate) walls: Vec<Wall>,
    pub(crate) bullets: Vec<Bullet>,
    pub(crate) rng: StdRng,
    seed: u64,
}

/// What a player action did to the board.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Moved(Position),
    Shot(Option<BulletId>),
}

impl Board {
    /// Create a `height` x `width` board and generate its content.
    ///
    /// Without a seed the generator is seeded from wall-clock time.
    pub fn new(
        height: usize,
        width: usize,
        difficulty: Difficulty,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        if height < 3 || width < 3 {
            return Err(GameError::BoardTooSmall { height, width });
        }
        let seed = seed.unwrap_or_else(clock_seed);
        let mut board = Board {
            height,
            width,
            difficulty,
            grid: generate_grid(height, width),
            tanks: Vec::new(),
            walls: Vec::new(),
            bullets: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            seed,
        };
        board.generate()?;
        Ok(board)
    }

    /// Refill the grid with fresh random content for the current difficulty.
    pub fn generate(&mut self) -> Result<(), GameError> {
        fill_grid(&mut self.grid, self.difficulty, &mut self.rng)?;
        self.walls = collect_walls(&self.grid);
        let destructible = self.walls.iter().filter(|w| w.is_destructible()).count();
        let bombs = self.walls.iter().filter(|w| w.is_bomb()).count();
        info!(
            "[Board] Generated {}x{} board (difficulty={}, seed={}, walls={}, \
             destructible={}, bombs={})",
            self.height,
            self.width,
            self.difficulty.level(),
            self.seed,
            self.walls.len(),
            destructible,
            bombs
        );
        Ok(())
    }

    /// Switch difficulty and regenerate in place. Tanks are put back on their
    /// own corner so none ends up inside a wall.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        self.difficulty = difficulty;
        self.generate()?;
        for index in 0..self.tanks.len() {
            let pos = start_position(self.tanks[index].slot, self.height, self.width);
            self.clear_spawn(pos, true);
            self.tanks[index].pos = pos;
        }
        Ok(())
    }

    /// Dispatch a key from `/action`: `f`/`F` shoots, anything else moves.
    pub fn apply_action(
        &mut self,
        player_id: PlayerId,
        key: char,
        now: Instant,
    ) -> Result<ActionOutcome, GameError> {
        if key.eq_ignore_ascii_case(&'f') {
            shoot(self, player_id, now).map(ActionOutcome::Shot)
        } else {
            move_tank(self, player_id, key).map(ActionOutcome::Moved)
        }
    }

    /// Put a player on the next free corner.
    pub fn join(&mut self, player: Player) -> Result<Position, GameError> {
        insert_player(self, player)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tank(&self, player_id: PlayerId) -> Option<&Tank> {
        self.tanks.iter().find(|t| t.id() == player_id)
    }

    pub(crate) fn tank_mut(&mut self, player_id: PlayerId) -> Result<&mut Tank, GameError> {
        self.tanks
            .iter_mut()
            .find(|t| t.id() == player_id)
            .ok_or(GameError::UnknownPlayer(player_id))
    }

    pub fn tank_at(&self, pos: Position) -> Option<&Tank> {
        self.tanks.iter().find(|t| t.is_alive && t.pos == pos)
    }

    pub fn is_full(&self) -> bool {
        self.tanks.len() >= MAX_PLAYERS
    }

    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        self.grid.get(pos.x).and_then(|row| row.get(pos.y)).map(|cell| cell.tile)
    }

    /// Drop every bullet in flight, returning how many there were.
    pub fn clear_bullets(&mut self) -> usize {
        let count = self.bullets.len();
        self.bullets.clear();
        count
    }

    /// Overwrite a tile, keeping the wall list in step.
    pub(crate) fn set_tile(&mut self, pos: Position, tile: Tile) {
        if let Some(cell) = self.grid.get_mut(pos.x).and_then(|row| row.get_mut(pos.y)) {
            cell.tile = tile;
            self.walls.retain(|w| w.pos != pos);
            if tile.is_wall() {
                self.walls.push(Wall::new(pos, tile));
            }
        }
    }

    /// Clear a spawn cell and its neighbours.
    pub(crate) fn clear_spawn(&mut self, pos: Position, is_start: bool) {
        let cell = &mut self.grid[pos.x][pos.y];
        cell.tile = Tile::Empty;
        cell.is_start |= is_start;
        clear_surroundings(&mut self.grid, pos);
        self.walls.retain(|w| w.pos.x.abs_diff(pos.x) > 1 || w.pos.y.abs_diff(pos.y) > 1);
    }

    /// The cell in front of a tank, if it is on the board.
    pub(crate) fn ahead_of(&self, tank: &Tank) -> Option<Position> {
        tank.pos.step(tank.direction, self.height, self.width)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
