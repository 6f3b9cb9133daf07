//! HTTP routing configuration.

use actix_web::{error, web};

use crate::server::handlers;
use crate::server::http_error::ServerError;

/// Register every route of the API.
///
/// Malformed JSON bodies and difficulty paths are answered with the same
/// error payload as any other rejected request.
pub fn config(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        error::Error::from(ServerError::InvalidPayload(err.to_string()))
    });

    cfg.app_data(json_config)
        .route("/time", web::get().to(handlers::time))
        .route("/bulletsCoord", web::get().to(handlers::bullets))
        .service(
            web::resource("/player")
                .route(web::post().to(handlers::create_player))
                .route(web::get().to(handlers::list_players)),
        )
        .route("/join", web::post().to(handlers::join))
        .route("/game", web::get().to(handlers::game))
        .route("/action/{player_id}/{key}", web::get().to(handlers::action))
        .route("/highScore", web::get().to(handlers::high_score))
        .service(
            web::resource("/changeDifficulty/{level}")
                .app_data(web::PathConfig::default().error_handler(|err, _req| {
                    error::Error::from(ServerError::InvalidPayload(err.to_string()))
                }))
                .route(web::post().to(handlers::change_difficulty)),
        )
        .route("/getDifficulty", web::get().to(handlers::get_difficulty))
        .route("/closeGame", web::post().to(handlers::close_game));
}
