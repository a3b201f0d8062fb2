use std::fmt;

use serde::{Serialize, Serializer};
use shakmaty::{CastlingMode, Chess, Color, Move, Position, uci::UciMove};

/// Whether playing `m` puts the opponent in check.
pub fn gives_check(position: &Chess, m: Move) -> bool {
    let mut after = position.clone();
    after.play_unchecked(m);
    after.is_check()
}

/// Captures and checking moves among `moves`. A move that is both only
/// appears in the capture list.
pub fn tactical_moves(position: &Chess, moves: &[Move]) -> (Vec<Move>, Vec<Move>) {
    let mut captures = Vec::new();
    let mut checks = Vec::new();
    for &m in moves {
        if m.is_capture() {
            captures.push(m);
        } else if gives_check(position, m) {
            checks.push(m);
        }
    }
    (captures, checks)
}

/// Resolve an engine move against the position, rejecting illegal ones.
pub fn to_legal(position: &Chess, uci: &UciMove) -> Option<Move> {
    uci.to_move(position).ok()
}

pub fn to_uci(m: Move) -> UciMove {
    m.to_uci(CastlingMode::Standard)
}

/// Final result of a finished game, in standard notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    pub fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GameResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The result if the game is over without anyone having to claim it:
/// checkmate, stalemate, insufficient material or the seventy-five-move
/// rule. Repetitions cannot be seen from a single FEN.
pub fn game_result(position: &Chess) -> Option<GameResult> {
    if position.is_checkmate() {
        return Some(match position.turn() {
            Color::White => GameResult::BlackWins,
            Color::Black => GameResult::WhiteWins,
        });
    }
    if position.is_stalemate() || position.is_insufficient_material() || position.halfmoves() >= 150
    {
        return Some(GameResult::Draw);
    }
    None
}
