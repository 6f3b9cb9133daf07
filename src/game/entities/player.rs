use serde::{Deserialize, Serialize};

use crate::game::types::PlayerId;

/// Identity and score of a player, independent of where its tank stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Compared byte for byte; never hashed.
    pub password: String,
    pub high_score: u32,
    pub remaining_lives: u8,
    pub score: u32,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: String,
        password: String,
        high_score: u32,
        remaining_lives: u8,
    ) -> Self {
        Self {
            id,
            name,
            password,
            high_score,
            remaining_lives,
            score: 0,
        }
    }

    /// Credit one elimination. Returns true when the high score moved.
    pub fn record_elimination(&mut self) -> bool {
        self.score += 1;
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}
