//! Move selection for ratings below the engine's strength limiter.
//!
//! Novices play random moves, picking up a taste for captures and checks as
//! the rating grows. Above 600 the engine is asked for a shallow multi-PV
//! search and the reply is either its top line or, with a rating-dependent
//! probability, one of the weaker lines.

use rand::{Rng, seq::IndexedRandom};
use shakmaty::{Chess, Move, Position};
use tracing::{debug, warn};

use crate::{
    engine::Analyzer,
    error::Error,
    moves::{tactical_moves, to_legal},
    strength::{Band, Rating, SearchProfile, heuristic_probability},
    types::Limit,
};

/// Number of candidate lines requested from the engine by default.
pub const DEFAULT_CANDIDATES: u32 = 5;

const CAPTURE_PREFERENCE: f64 = 0.7;
const CHECK_PREFERENCE: f64 = 0.5;

/// Pick a move for `rating` in `position`.
///
/// Ratings in the limiter band are treated like the strongest shallow-search
/// band; the request handler normally routes them to the engine instead.
/// Returns `None` only when the position has no legal moves. Engine failures
/// never escape: they degrade to simpler strategies.
pub fn select_move<R: Rng + ?Sized>(
    position: &Chess,
    rating: Rating,
    engine: &mut dyn Analyzer,
    candidates: u32,
    rng: &mut R,
) -> Option<Move> {
    match rating.band() {
        Band::Novice => random_move(position, rating.get(), rng),
        Band::Beginner | Band::Intermediate | Band::Limited => {
            limited_search_move(position, rating.get(), engine, candidates, rng)
        }
    }
}

/// Random legal move, biased towards captures and checks with a
/// probability that grows with the rating.
pub fn random_move<R: Rng + ?Sized>(position: &Chess, rating: u32, rng: &mut R) -> Option<Move> {
    let legal = position.legal_moves();
    if legal.is_empty() {
        return None;
    }

    if rng.random::<f64>() < heuristic_probability(rating) {
        let (captures, checks) = tactical_moves(position, &legal);
        if !captures.is_empty() && rng.random::<f64>() < CAPTURE_PREFERENCE {
            return captures.choose(rng).copied();
        }
        if !checks.is_empty() && rng.random::<f64>() < CHECK_PREFERENCE {
            return checks.choose(rng).copied();
        }
    }

    legal.choose(rng).copied()
}

/// Shallow engine search with deliberate blunders.
pub fn limited_search_move<R: Rng + ?Sized>(
    position: &Chess,
    rating: u32,
    engine: &mut dyn Analyzer,
    candidates: u32,
    rng: &mut R,
) -> Option<Move> {
    let profile = SearchProfile::for_rating(rating);
    let ranked = candidate_moves(position, engine, profile.depth, candidates);

    if ranked.is_empty() {
        debug!(rating, "no engine candidates, playing a random legal move");
        return position.legal_moves().choose(rng).copied();
    }

    let roll = rng.random::<f64>();
    if roll < profile.blunder_probability && ranked.len() > 1 {
        debug!(rating, candidates = ranked.len(), "blundering");
        return ranked[1..].choose(rng).copied();
    }
    ranked.first().copied()
}

/// Legal, distinct first moves of the engine's lines, best first. Falls
/// back to a single best move when the multi-PV search gives nothing.
/// Errors are logged and turn into an empty list.
fn candidate_moves(
    position: &Chess,
    engine: &mut dyn Analyzer,
    depth: u32,
    count: u32,
) -> Vec<Move> {
    let mut ranked = Vec::new();

    match engine.analyze(position, Limit::depth(depth), count) {
        Ok(variations) => {
            for variation in variations {
                let Some(first) = variation.pv.first() else {
                    continue;
                };
                match to_legal(position, first) {
                    Some(m) if !ranked.contains(&m) => ranked.push(m),
                    Some(_) => {}
                    None => warn!(%first, "ignoring illegal candidate from engine"),
                }
            }
        }
        Err(err) => warn!(%err, "multi-PV analysis failed"),
    }

    if ranked.is_empty() {
        match best_move(position, engine, depth) {
            Ok(Some(m)) => ranked.push(m),
            Ok(None) => {}
            Err(err) => warn!(%err, "best move request failed"),
        }
    }

    ranked
}

fn best_move(
    position: &Chess,
    engine: &mut dyn Analyzer,
    depth: u32,
) -> Result<Option<Move>, Error> {
    match engine.play(position, Limit::depth(depth))? {
        Some(uci) => to_legal(position, &uci)
            .map(Some)
            .ok_or(Error::IllegalMove(uci)),
        None => Ok(None),
    }
}
