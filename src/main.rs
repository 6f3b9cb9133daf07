//! Main entry point for the tank grid server.
//!
//! Builds the board and the credential store, starts the game server actor and
//! launches the HTTP server exposing the polling API.

use std::io;

use actix::Actor;
use actix_web::{App, HttpServer, web};
use clap::Parser;
use log::info;

use config::server::ServerArgs;
use game::board::Board;
use game::types::Difficulty;
use server::game_server::server::GameServer;
use server::store::{JsonFileStore, MemoryStore, PlayerStore};

pub mod config;
mod game;
mod server;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Default to info level unless RUST_LOG says otherwise.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = ServerArgs::parse();

    let difficulty = Difficulty::new(args.difficulty).map_err(io::Error::other)?;
    let board =
        Board::new(args.height, args.width, difficulty, args.seed).map_err(io::Error::other)?;
    let store: Box<dyn PlayerStore> = match &args.store {
        Some(path) => Box::new(JsonFileStore::open(path).map_err(io::Error::other)?),
        None => Box::new(MemoryStore::new()),
    };

    let game_server = GameServer::new(board, store).start();
    let state = web::Data::new(server::state::AppState::new(game_server));

    let (host, port) = args.bind_address();
    info!("[Main] Listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .app_data(state.clone())
            .configure(server::router::config)
    })
    .bind((host, port))?
    .run()
    .await
}
