//! One turn of a game: evaluate the user's move, reply at the requested
//! strength, evaluate the reply.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use shakmaty::{CastlingMode, Chess, Move, Position, fen::Fen};
use tracing::info;

use crate::{
    engine::{Analyzer, fen_of},
    error::Error,
    handle::EngineHandle,
    moves::{GameResult, game_result, to_legal, to_uci},
    policy::{DEFAULT_CANDIDATES, select_move},
    strength::{Band, Rating, limiter_elo},
    types::{Evaluation, Limit},
};

/// Time budgets for the engine calls made during a turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnSettings {
    pub eval_time: Duration,
    pub play_time: Duration,
    pub candidates: u32,
}

impl Default for TurnSettings {
    fn default() -> Self {
        Self {
            eval_time: Duration::from_millis(100),
            play_time: Duration::from_millis(500),
            candidates: DEFAULT_CANDIDATES,
        }
    }
}

/// Reply when the submitted position is already terminal.
#[derive(Debug, Clone, Serialize)]
pub struct GameOver {
    pub game_over: bool,
    pub result: GameResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineReply {
    pub position: String,
    #[serde(rename = "move")]
    pub mv: String,
    pub game_over: bool,
    pub eval_before: Evaluation,
    pub eval_after: Evaluation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Turn {
    Over(GameOver),
    Reply(EngineReply),
}

pub fn parse_position(fen: Option<&str>) -> Result<Chess, Error> {
    let fen = fen.map(str::trim).filter(|f| !f.is_empty()).ok_or(Error::MissingPosition)?;
    let fen: Fen = fen.parse()?;
    Ok(fen.into_position(CastlingMode::Standard)?)
}

/// Play one turn. Terminal positions are answered without touching the
/// engine, so a finished game can be reported even when no engine is
/// installed.
pub fn play_turn<R: Rng + ?Sized>(
    handle: &EngineHandle,
    position: Chess,
    rating: Rating,
    settings: &TurnSettings,
    rng: &mut R,
) -> Result<Turn, Error> {
    if let Some(result) = game_result(&position) {
        return Ok(Turn::Over(GameOver {
            game_over: true,
            result,
        }));
    }
    handle
        .with(|engine| engine_turn(engine, position, rating, settings, rng))
        .map(Turn::Reply)
}

/// Evaluate, reply and evaluate again. `position` must not be terminal.
pub fn engine_turn<R: Rng + ?Sized>(
    engine: &mut dyn Analyzer,
    position: Chess,
    rating: Rating,
    settings: &TurnSettings,
    rng: &mut R,
) -> Result<EngineReply, Error> {
    let eval_limit = Limit::time(settings.eval_time);
    let eval_before = evaluate(engine, &position, eval_limit)?;

    let reply = match rating.band() {
        Band::Limited => limiter_move(engine, &position, rating, settings)?,
        _ => select_move(&position, rating, engine, settings.candidates, rng)
            .ok_or(Error::NoMove)?,
    };
    let uci = to_uci(reply);

    let mut after = position;
    after.play_unchecked(reply);
    let eval_after = evaluate(engine, &after, eval_limit)?;
    let game_over = game_result(&after).is_some();

    info!(rating = rating.get(), band = ?rating.band(), %uci, game_over, "engine replied");

    Ok(EngineReply {
        position: fen_of(&after),
        mv: uci.to_string(),
        game_over,
        eval_before,
        eval_after,
    })
}

/// Score of `position` from White's point of view.
pub fn evaluate(
    engine: &mut dyn Analyzer,
    position: &Chess,
    limit: Limit,
) -> Result<Evaluation, Error> {
    engine
        .analyze(position, limit, 1)?
        .first()
        .and_then(|v| v.score)
        .map(|score| score.white(position.turn()))
        .ok_or_else(|| Error::Protocol("analysis returned no score".to_string()))
}

/// Let the engine's own limiter play at `rating`, then switch it off again
/// so evaluations stay at full strength.
fn limiter_move(
    engine: &mut dyn Analyzer,
    position: &Chess,
    rating: Rating,
    settings: &TurnSettings,
) -> Result<Move, Error> {
    let (min, max) = engine
        .options()
        .iter()
        .find(|o| o.name == "UCI_Elo")
        .map_or((None, None), |o| (o.min, o.max));
    let elo = limiter_elo(rating, min, max);

    engine.configure(&[
        ("UCI_LimitStrength", "true".to_string()),
        ("UCI_Elo", elo.to_string()),
    ])?;
    let played = engine.play(position, Limit::time(settings.play_time));
    let reset = engine.configure(&[("UCI_LimitStrength", "false".to_string())]);

    let uci = played?.ok_or(Error::NoMove)?;
    reset?;
    to_legal(position, &uci).ok_or(Error::IllegalMove(uci))
}
