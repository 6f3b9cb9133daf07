//! Application state shared by the HTTP handlers.

use actix::Addr;

use crate::server::game_server::server::GameServer;

pub struct AppState {
    /// The actor owning the board and the credential store.
    pub game_server: Addr<GameServer>,
}

impl AppState {
    pub fn new(game_server: Addr<GameServer>) -> Self {
        AppState { game_server }
    }
}
