//! Messages accepted by the `GameServer` actor and the JSON bodies of the API.

use actix::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game::systems::{BoardView, BulletCoords, PlayerStates};
use crate::game::types::PlayerId;
use crate::server::http_error::ServerError;

/// Body of `POST /player`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerCredentials {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /join`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub player_name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HighScoreQuery {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerList {
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub message: String,
    pub player_id: PlayerId,
    pub board: PlayerStates,
    pub welcome_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScore {
    pub score: u32,
    pub high_score: u32,
}

/// Seconds counted by the game clock.
#[derive(Message)]
#[rtype(result = "u64")]
pub struct GetElapsed;

#[derive(Message)]
#[rtype(result = "BulletCoords")]
pub struct GetBullets;

#[derive(Message)]
#[rtype(result = "BoardView")]
pub struct GetBoard;

#[derive(Message)]
#[rtype(result = "u8")]
pub struct GetDifficulty;

#[derive(Message)]
#[rtype(result = "Result<(), ServerError>")]
pub struct ChangeDifficulty {
    pub level: u8,
}

/// Create a player record, or check the password of an existing one.
#[derive(Message)]
#[rtype(result = "Result<PlayerSummary, ServerError>")]
pub struct RegisterPlayer {
    pub name: String,
    pub password: String,
}

#[derive(Message)]
#[rtype(result = "Result<PlayerList, ServerError>")]
pub struct ListPlayers;

#[derive(Message)]
#[rtype(result = "Result<JoinResponse, ServerError>")]
pub struct JoinGame {
    pub player_name: String,
    pub password: String,
}

/// A key pressed by a player: `f`/`F` shoots, anything else moves.
#[derive(Message)]
#[rtype(result = "Result<BoardView, ServerError>")]
pub struct PlayerAction {
    pub player_id: PlayerId,
    pub key: char,
}

#[derive(Message)]
#[rtype(result = "Result<HighScore, ServerError>")]
pub struct GetHighScore {
    pub name: String,
}

/// Abandon every bullet in flight. Replies with how many were dropped.
#[derive(Message)]
#[rtype(result = "usize")]
pub struct CloseGame;
