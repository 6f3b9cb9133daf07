/// Game server actor.
///
/// Owns the board and the credential store. Every request and every bullet
/// tick runs as a message or timer callback of this actor, so board mutations
/// never interleave.
use std::collections::HashMap;
use std::time::{Duration, Instant};

use actix::prelude::*;
use log::{debug, error, info, warn};

use crate::config::game::{BULLET_TICK, CLOCK_INTERVAL, STARTING_LIVES};
use crate::game::board::{ActionOutcome, Board};
use crate::game::error::GameError;
use crate::game::systems::{
    BoardView, BulletStep, board_state, bullet_coords, player_state, step_bullet,
};
use crate::game::types::{BulletId, Difficulty, PlayerId};
use crate::server::game_server::messages::*;
use crate::server::http_error::ServerError;
use crate::server::password::verify_password;
use crate::server::store::PlayerStore;

pub struct GameServer {
    board: Board,
    store: Box<dyn PlayerStore>,
    elapsed_secs: u64,
    /// Pending tick of every bullet in flight.
    bullet_timers: HashMap<BulletId, SpawnHandle>,
    bullet_tick: Duration,
}

impl GameServer {
    pub fn new(board: Board, store: Box<dyn PlayerStore>) -> Self {
        Self {
            board,
            store,
            elapsed_secs: 0,
            bullet_timers: HashMap::new(),
            bullet_tick: BULLET_TICK,
        }
    }

    /// Override the interval between two bullet steps.
    pub fn with_bullet_tick(mut self, tick: Duration) -> Self {
        self.bullet_tick = tick;
        self
    }

    fn schedule_bullet(&mut self, bullet_id: BulletId, ctx: &mut Context<Self>) {
        let handle = ctx.run_later(self.bullet_tick, move |act, ctx| {
            act.advance_bullet(bullet_id, ctx);
        });
        self.bullet_timers.insert(bullet_id, handle);
    }

    /// One tick of a bullet; re-queues itself while the bullet flies.
    fn advance_bullet(&mut self, bullet_id: BulletId, ctx: &mut Context<Self>) {
        self.bullet_timers.remove(&bullet_id);
        let step = step_bullet(&mut self.board, bullet_id, 1.0);

        match &step {
            BulletStep::Flying => {
                self.schedule_bullet(bullet_id, ctx);
                return;
            }
            BulletStep::Collided { other } => {
                if let Some(handle) = self.bullet_timers.remove(other) {
                    ctx.cancel_future(handle);
                }
            }
            BulletStep::HitTank { shooter, high_score: Some(high_score), .. } => {
                self.record_high_score(*shooter, *high_score);
            }
            BulletStep::Detonated { at, removed } => {
                info!(
                    "[GameServer] Bomb at ({}, {}) eliminated {} players",
                    at.x,
                    at.y,
                    removed.len()
                );
            }
            _ => {}
        }
        debug!("[GameServer] Bullet {} finished: {:?}", bullet_id, step);
    }

    fn record_high_score(&mut self, player_id: PlayerId, high_score: u32) {
        if let Err(err) = self.store.update_high_score(player_id, high_score) {
            error!("[GameServer] Could not save high score of player {}: {}", player_id, err);
        }
    }

    /// Cancel every pending bullet tick and empty the live collection.
    fn abandon_bullets(&mut self, ctx: &mut Context<Self>) -> usize {
        for (_, handle) in self.bullet_timers.drain() {
            ctx.cancel_future(handle);
        }
        self.board.clear_bullets()
    }

    fn join(&mut self, name: &str, password: &str) -> Result<JoinResponse, ServerError> {
        let (record, message, welcome_message) = match self.store.find_by_name(name)? {
            Some(record) => {
                if record.password != password {
                    warn!("[GameServer] Incorrect password for player {}", name);
                    return Err(ServerError::IncorrectPassword);
                }
                let welcome = format!("Welcome back to the game, {}!", name);
                (record, "Player already exists", welcome)
            }
            None => {
                if !verify_password(password) {
                    return Err(ServerError::WeakPassword);
                }
                if self.board.is_full() {
                    return Err(GameError::BoardFull.into());
                }
                let id = self.store.insert(name, password)?;
                let record = self.store.get_by_id(id)?;
                (record, "Player added", format!("Welcome to the game, {}!", name))
            }
        };

        if self.board.tank(record.id).is_none() {
            self.board.join(record.to_player(STARTING_LIVES))?;
        }
        info!("[GameServer] Player {} joined with id {}", name, record.id);

        Ok(JoinResponse {
            message: message.to_string(),
            player_id: record.id,
            board: player_state(&self.board),
            welcome_message,
        })
    }

    fn register(&mut self, name: &str, password: &str) -> Result<PlayerSummary, ServerError> {
        let record = match self.store.find_by_name(name)? {
            Some(record) if record.password == password => record,
            Some(_) => return Err(ServerError::IncorrectPassword),
            None => {
                if !verify_password(password) {
                    return Err(ServerError::WeakPassword);
                }
                let id = self.store.insert(name, password)?;
                info!("[GameServer] Registered player {} with id {}", name, id);
                self.store.get_by_id(id)?
            }
        };
        Ok(PlayerSummary {
            id: record.id,
            name: record.username,
        })
    }

    fn high_score(&self, name: &str) -> Result<HighScore, ServerError> {
        let record = self.store.find_by_name(name)?.ok_or(ServerError::PlayerNotFound)?;
        let live = self.board.tank(record.id).map(|t| &t.player);
        Ok(HighScore {
            score: live.map_or(0, |p| p.score),
            high_score: live.map_or(record.high_score, |p| p.high_score.max(record.high_score)),
        })
    }
}

impl Actor for GameServer {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        ctx.run_interval(CLOCK_INTERVAL, |act, _| {
            act.elapsed_secs += 1;
        });
        info!(
            "[GameServer] Started with a {}x{} board at difficulty {}",
            self.board.height(),
            self.board.width(),
            self.board.difficulty().level()
        );
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        let abandoned = self.abandon_bullets(ctx);
        info!("[GameServer] Stopped, {} bullets abandoned", abandoned);
    }
}

impl Handler<GetElapsed> for GameServer {
    type Result = MessageResult<GetElapsed>;

    fn handle(&mut self, _: GetElapsed, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.elapsed_secs)
    }
}

impl Handler<GetBullets> for GameServer {
    type Result = MessageResult<GetBullets>;

    fn handle(&mut self, _: GetBullets, _: &mut Context<Self>) -> Self::Result {
        MessageResult(bullet_coords(&self.board))
    }
}

impl Handler<GetBoard> for GameServer {
    type Result = MessageResult<GetBoard>;

    fn handle(&mut self, _: GetBoard, _: &mut Context<Self>) -> Self::Result {
        MessageResult(board_state(&self.board))
    }
}

impl Handler<GetDifficulty> for GameServer {
    type Result = MessageResult<GetDifficulty>;

    fn handle(&mut self, _: GetDifficulty, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.board.difficulty().level())
    }
}

impl Handler<ChangeDifficulty> for GameServer {
    type Result = Result<(), ServerError>;

    fn handle(&mut self, msg: ChangeDifficulty, _: &mut Context<Self>) -> Self::Result {
        let difficulty = Difficulty::new(msg.level)?;
        self.board.set_difficulty(difficulty)?;
        info!("[GameServer] Difficulty set to {}, board regenerated", msg.level);
        Ok(())
    }
}

impl Handler<RegisterPlayer> for GameServer {
    type Result = Result<PlayerSummary, ServerError>;

    fn handle(&mut self, msg: RegisterPlayer, _: &mut Context<Self>) -> Self::Result {
        self.register(&msg.name, &msg.password)
    }
}

impl Handler<ListPlayers> for GameServer {
    type Result = Result<PlayerList, ServerError>;

    fn handle(&mut self, _: ListPlayers, _: &mut Context<Self>) -> Self::Result {
        let players = self
            .store
            .all()?
            .into_iter()
            .map(|r| PlayerSummary { id: r.id, name: r.username })
            .collect();
        Ok(PlayerList { players })
    }
}

impl Handler<JoinGame> for GameServer {
    type Result = Result<JoinResponse, ServerError>;

    fn handle(&mut self, msg: JoinGame, _: &mut Context<Self>) -> Self::Result {
        self.join(&msg.player_name, &msg.password)
    }
}

impl Handler<PlayerAction> for GameServer {
    type Result = Result<BoardView, ServerError>;

    fn handle(&mut self, msg: PlayerAction, ctx: &mut Context<Self>) -> Self::Result {
        debug!("[GameServer] Player {} pressed '{}'", msg.player_id, msg.key);
        let outcome = self.board.apply_action(msg.player_id, msg.key, Instant::now())?;
        if let ActionOutcome::Shot(Some(bullet_id)) = outcome {
            self.schedule_bullet(bullet_id, ctx);
        }
        let view = board_state(&self.board);
        debug!("[GameServer] Board after action:\n{}", view);
        Ok(view)
    }
}

impl Handler<GetHighScore> for GameServer {
    type Result = Result<HighScore, ServerError>;

    fn handle(&mut self, msg: GetHighScore, _: &mut Context<Self>) -> Self::Result {
        self.high_score(&msg.name)
    }
}

impl Handler<CloseGame> for GameServer {
    type Result = MessageResult<CloseGame>;

    fn handle(&mut self, _: CloseGame, ctx: &mut Context<Self>) -> Self::Result {
        let abandoned = self.abandon_bullets(ctx);
        info!("[GameServer] Game is closing, {} bullets abandoned", abandoned);
        MessageResult(abandoned)
    }
}
