//! Server layer root module.
//!
//! - Application state and HTTP routing
//! - The game server actor owning the board
//! - Credential store and password rules
//! - Error to HTTP response mapping

pub mod state;
pub mod router;
pub mod handlers;
pub mod http_error;
pub mod game_server;
pub mod store;
pub mod password;
