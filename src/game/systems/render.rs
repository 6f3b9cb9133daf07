//! Wire views of the board, as polled by clients.

use std::fmt;

use serde::Serialize;

use crate::game::board::Board;
use crate::game::types::{PlayerId, Tile};

const BORDER: char = '#';
const TANK: char = 'P';

/// The grid as a character matrix with a one-cell `#` border.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub board: Vec<Vec<char>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStates {
    pub players: Vec<PlayerState>,
}

/// A bullet in the coordinates of `BoardView`, border included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletCoord {
    pub coord_x: f64,
    pub coord_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletCoords {
    pub bullets: Vec<BulletCoord>,
}

fn tile_symbol(tile: Tile) -> char {
    match tile {
        Tile::Breakable => '+',
        Tile::Unbreakable => '#',
        // Bombs are not distinguishable from paths on the wire.
        Tile::Empty | Tile::Bomb => ' ',
    }
}

/// Render the grid. A tank shows as `P` over whatever tile it stands on.
pub fn board_state(board: &Board) -> BoardView {
    let border_row = vec![BORDER; board.width + 2];
    let mut rows = Vec::with_capacity(board.height + 2);
    rows.push(border_row.clone());

    for (x, row) in board.grid.iter().enumerate() {
        let mut line = Vec::with_capacity(board.width + 2);
        line.push(BORDER);
        for (y, cell) in row.iter().enumerate() {
            let occupied = board
                .tanks
                .iter()
                .any(|t| t.is_alive && t.pos.x == x && t.pos.y == y);
            line.push(if occupied { TANK } else { tile_symbol(cell.tile) });
        }
        line.push(BORDER);
        rows.push(line);
    }

    rows.push(border_row);
    BoardView { board: rows }
}

/// Id, name and coordinates of every tank, in join order.
pub fn player_state(board: &Board) -> PlayerStates {
    PlayerStates {
        players: board
            .tanks
            .iter()
            .map(|t| PlayerState {
                id: t.id(),
                name: t.player.name.clone(),
                x: t.pos.x,
                y: t.pos.y,
            })
            .collect(),
    }
}

pub fn bullet_coords(board: &Board) -> BulletCoords {
    BulletCoords {
        bullets: board
            .bullets
            .iter()
            .filter(|b| b.active)
            .map(|b| BulletCoord {
                coord_x: b.y + 1.0,
                coord_y: b.x + 1.0,
            })
            .collect(),
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.board {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
