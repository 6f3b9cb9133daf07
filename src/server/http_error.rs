/// Centralized HTTP error responses.
///
/// Every failure of the API is a `ServerError`; actix turns it into a JSON
/// body `{"error": <message>, "code": <CODE>}` with the matching status.
use actix::MailboxError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::game::error::GameError;
use crate::server::store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    #[error("Missing '{0}' field")]
    MissingField(&'static str),

    #[error("Password does not meet security requirements. Please try again.")]
    WeakPassword,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Player not found")]
    PlayerNotFound,

    #[error("Invalid difficulty level {0}")]
    InvalidDifficulty(i64),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Failed to process the request: {0}")]
    Store(#[from] StoreError),

    #[error("Game server unavailable: {0}")]
    Mailbox(#[from] MailboxError),
}

impl ServerError {
    /// Stable machine-readable code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::InvalidPayload(_) => "INVALID_PAYLOAD",
            ServerError::MissingField(_) => "MISSING_FIELD",
            ServerError::WeakPassword => "WEAK_PASSWORD",
            ServerError::IncorrectPassword => "INCORRECT_PASSWORD",
            ServerError::PlayerNotFound | ServerError::Game(GameError::UnknownPlayer(_)) => {
                "PLAYER_NOT_FOUND"
            }
            ServerError::InvalidDifficulty(_)
            | ServerError::Game(GameError::InvalidDifficulty(_)) => "INVALID_DIFFICULTY",
            ServerError::Game(GameError::BoardFull) => "BOARD_FULL",
            ServerError::Game(GameError::BoardTooSmall { .. }) => "BOARD_TOO_SMALL",
            ServerError::Store(_) => "STORAGE_ERROR",
            ServerError::Mailbox(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidPayload(_)
            | ServerError::MissingField(_)
            | ServerError::WeakPassword
            | ServerError::InvalidDifficulty(_)
            | ServerError::Game(GameError::InvalidDifficulty(_)) => StatusCode::BAD_REQUEST,
            ServerError::IncorrectPassword => StatusCode::FORBIDDEN,
            ServerError::PlayerNotFound | ServerError::Game(GameError::UnknownPlayer(_)) => {
                StatusCode::NOT_FOUND
            }
            ServerError::Game(GameError::BoardFull | GameError::BoardTooSmall { .. })
            | ServerError::Store(_)
            | ServerError::Mailbox(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        http_error_response(self.code(), &self.to_string(), self.status_code())
    }
}

/// Returns an HTTP error response with a JSON body.
pub fn http_error_response(code: &str, message: &str, status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": message,
        "code": code,
    }))
}
