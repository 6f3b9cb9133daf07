use log::debug;
use rand::Rng;

use crate::config::game::BOMB_CAP_BASE;
use crate::game::entities::Wall;
use crate::game::error::GameError;
use crate::game::types::{Cell, Difficulty, Grid, Position, Tile};

/// Percentage of each tile type rolled during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileWeights {
    pub empty: u32,
    pub breakable: u32,
    pub unbreakable: u32,
    pub bomb: u32,
}

impl TileWeights {
    /// Weights for a difficulty level. Every known level sums to 100.
    pub fn for_difficulty(level: u8) -> Result<Self, GameError> {
        let (empty, breakable, unbreakable, bomb) = match level {
            1 => (60, 20, 15, 5),
            2 => (55, 20, 15, 10),
            3 => (50, 25, 15, 10),
            4 => (40, 30, 20, 10),
            other => return Err(GameError::InvalidDifficulty(other)),
        };
        Ok(Self { empty, breakable, unbreakable, bomb })
    }

    pub fn total(&self) -> u32 {
        self.empty + self.breakable + self.unbreakable + self.bomb
    }

    /// Tile for a roll in `0..100`.
    fn pick(&self, roll: u32) -> Tile {
        if roll < self.empty {
            Tile::Empty
        } else if roll < self.empty + self.breakable {
            Tile::Breakable
        } else if roll < self.empty + self.breakable + self.unbreakable {
            Tile::Unbreakable
        } else {
            Tile::Bomb
        }
    }
}

/// An all-empty grid of the given size.
pub fn generate_grid(height: usize, width: usize) -> Grid {
    vec![vec![Cell::default(); width]; height]
}

/// Fill every cell of `grid` at random, then run the repair passes.
pub fn fill_grid<R: Rng>(
    grid: &mut Grid,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<(), GameError> {
    let weights = TileWeights::for_difficulty(difficulty.level())?;
    let max_bombs = BOMB_CAP_BASE + difficulty.level() as usize;
    let mut bombs = 0;

    for row in grid.iter_mut() {
        for cell in row.iter_mut() {
            let mut tile = weights.pick(rng.random_range(0..100));
            if tile == Tile::Bomb {
                if bombs < max_bombs {
                    bombs += 1;
                } else {
                    tile = Tile::Empty;
                }
            }
            *cell = Cell { tile, is_start: false };
        }
    }

    let (height, width) = dimensions(grid);
    let repaired = fix_squares(grid, square_size(height, width));
    fix_rows_and_columns(grid);
    debug!(
        "[Board] Filled {}x{} grid: {} bombs, {} solid squares repaired",
        height, width, bombs, repaired
    );
    Ok(())
}

pub fn dimensions(grid: &Grid) -> (usize, usize) {
    let height = grid.len();
    let width = grid.first().map_or(0, |row| row.len());
    (height, width)
}

/// Side of the solid unbreakable block that generation refuses to leave.
pub fn square_size(height: usize, width: usize) -> usize {
    (height.min(width) / 10).max(2)
}

/// Break every `k` x `k` block made only of unbreakable walls by clearing its
/// top-left cell. Returns the number of blocks broken.
///
/// Clearing a cell can only break blocks, never form one, so a single
/// row-major sweep over the live grid leaves no block behind.
pub fn fix_squares(grid: &mut Grid, k: usize) -> usize {
    let (height, width) = dimensions(grid);
    if k == 0 || k > height || k > width {
        return 0;
    }

    let mut repaired = 0;
    for i in 0..=height - k {
        for j in 0..=width - k {
            let solid = grid[i..i + k]
                .iter()
                .all(|row| row[j..j + k].iter().all(|cell| cell.tile == Tile::Unbreakable));
            if solid {
                grid[i][j].tile = Tile::Empty;
                repaired += 1;
            }
        }
    }
    repaired
}

/// Clear the first half of any row or column made only of unbreakable walls.
pub fn fix_rows_and_columns(grid: &mut Grid) {
    let (height, width) = dimensions(grid);

    for row in grid.iter_mut() {
        if row.iter().all(|cell| cell.tile == Tile::Unbreakable) {
            for cell in row.iter_mut().take(width / 2) {
                cell.tile = Tile::Empty;
            }
        }
    }

    for col in 0..width {
        if grid.iter().all(|row| row[col].tile == Tile::Unbreakable) {
            for row in grid.iter_mut().take(height / 2) {
                row[col].tile = Tile::Empty;
            }
        }
    }
}

/// Force the eight neighbours of `pos` to empty.
pub fn clear_surroundings(grid: &mut Grid, pos: Position) {
    let (height, width) = dimensions(grid);
    for x in pos.x.saturating_sub(1)..=(pos.x + 1).min(height - 1) {
        for y in pos.y.saturating_sub(1)..=(pos.y + 1).min(width - 1) {
            if (x, y) != (pos.x, pos.y) {
                grid[x][y].tile = Tile::Empty;
            }
        }
    }
}

/// Every non-empty tile of the grid, row by row.
pub fn collect_walls(grid: &Grid) -> Vec<Wall> {
    grid.iter()
        .enumerate()
        .flat_map(|(x, row)| {
            row.iter().enumerate().filter_map(move |(y, cell)| {
                cell.tile.is_wall().then(|| Wall::new(Position::new(x, y), cell.tile))
            })
        })
        .collect()
}
