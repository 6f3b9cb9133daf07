//! HTTP handlers of the polling API.
//!
//! Each handler validates its input, forwards a message to the `GameServer`
//! actor and turns the reply into a response.

use actix_web::{HttpResponse, web};
use log::warn;

use crate::game::types::PlayerId;
use crate::server::game_server::messages::*;
use crate::server::http_error::ServerError;
use crate::server::state::AppState;

fn required(value: Option<String>, field: &'static str) -> Result<String, ServerError> {
    value.filter(|v| !v.is_empty()).ok_or(ServerError::MissingField(field))
}

pub async fn time(state: web::Data<AppState>) -> Result<HttpResponse, ServerError> {
    let elapsed = state.game_server.send(GetElapsed).await?;
    Ok(HttpResponse::Ok().content_type("text/plain").body(elapsed.to_string()))
}

pub async fn bullets(state: web::Data<AppState>) -> Result<HttpResponse, ServerError> {
    let coords = state.game_server.send(GetBullets).await?;
    Ok(HttpResponse::Ok().json(coords))
}

pub async fn create_player(
    state: web::Data<AppState>,
    body: web::Json<PlayerCredentials>,
) -> Result<HttpResponse, ServerError> {
    let body = body.into_inner();
    let name = required(body.name, "name")?;
    let password = required(body.password, "password")?;
    let player = state.game_server.send(RegisterPlayer { name, password }).await??;
    Ok(HttpResponse::Ok().json(player))
}

pub async fn list_players(state: web::Data<AppState>) -> Result<HttpResponse, ServerError> {
    let players = state.game_server.send(ListPlayers).await??;
    Ok(HttpResponse::Ok().json(players))
}

pub async fn join(
    state: web::Data<AppState>,
    body: web::Json<JoinRequest>,
) -> Result<HttpResponse, ServerError> {
    let body = body.into_inner();
    let player_name = required(body.player_name, "playerName")?;
    let password = required(body.password, "password")?;
    let joined = state.game_server.send(JoinGame { player_name, password }).await??;
    Ok(HttpResponse::Ok().json(joined))
}

pub async fn game(state: web::Data<AppState>) -> Result<HttpResponse, ServerError> {
    let view = state.game_server.send(GetBoard).await?;
    Ok(HttpResponse::Ok().json(view))
}

pub async fn action(
    state: web::Data<AppState>,
    path: web::Path<(PlayerId, String)>,
) -> Result<HttpResponse, ServerError> {
    let (player_id, key) = path.into_inner();
    let key = key.chars().next().ok_or(ServerError::MissingField("key"))?;
    let view = state.game_server.send(PlayerAction { player_id, key }).await??;
    Ok(HttpResponse::Ok().json(view))
}

pub async fn high_score(
    state: web::Data<AppState>,
    query: web::Query<HighScoreQuery>,
) -> Result<HttpResponse, ServerError> {
    let name = required(query.into_inner().name, "name")?;
    let score = state.game_server.send(GetHighScore { name }).await??;
    Ok(HttpResponse::Ok().json(score))
}

pub async fn change_difficulty(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ServerError> {
    let requested = path.into_inner();
    let level = u8::try_from(requested).map_err(|_| ServerError::InvalidDifficulty(requested))?;
    state.game_server.send(ChangeDifficulty { level }).await?.inspect_err(|err| {
        warn!("[Http] Rejected difficulty {}: {}", requested, err);
    })?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "difficulty": level })))
}

pub async fn get_difficulty(state: web::Data<AppState>) -> Result<HttpResponse, ServerError> {
    let level = state.game_server.send(GetDifficulty).await?;
    Ok(HttpResponse::Ok().content_type("text/plain").body(level.to_string()))
}

pub async fn close_game(state: web::Data<AppState>) -> Result<HttpResponse, ServerError> {
    let abandoned = state.game_server.send(CloseGame).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Game closed",
        "abandonedBullets": abandoned,
    })))
}
