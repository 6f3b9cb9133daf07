use thiserror::Error;

use crate::game::types::PlayerId;

/// Failures of board operations. Blocked moves and shots on cooldown are not
/// errors; they simply leave the board unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid difficulty {0}, expected 1-4")]
    InvalidDifficulty(u8),

    #[error("board is full, at most 4 players can join")]
    BoardFull,

    #[error("player {0} is not on the board")]
    UnknownPlayer(PlayerId),

    #[error("board must be at least 3x3, got {height}x{width}")]
    BoardTooSmall { height: usize, width: usize },
}
