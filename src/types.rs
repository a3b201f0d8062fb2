use std::time::Duration;

use serde::{Serialize, Serializer};
use shakmaty::{Color, uci::UciMove};

/// Engine score as reported by UCI, relative to the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Cp(i32),
    /// Moves to mate; negative when the side to move is being mated.
    Mate(i32),
}

impl Score {
    /// Convert to White's point of view.
    pub fn white(self, turn: Color) -> Evaluation {
        let sign = if turn.is_white() { 1 } else { -1 };
        match self {
            Score::Cp(cp) => Evaluation::Centipawns(sign * cp),
            Score::Mate(n) => Evaluation::Mate(sign * n),
        }
    }
}

/// Position evaluation from White's perspective.
///
/// Serializes as a number of pawns (`0.35`) or as the string
/// `"Mate in N"`, which is what the browser client displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Centipawns(i32),
    Mate(i32),
}

impl Serialize for Evaluation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Evaluation::Centipawns(cp) => serializer.serialize_f64(f64::from(cp) / 100.0),
            Evaluation::Mate(n) => serializer.collect_str(&format_args!("Mate in {n}")),
        }
    }
}

/// Search budget for a single engine request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limit {
    pub depth: Option<u32>,
    pub movetime: Option<Duration>,
}

impl Limit {
    pub fn depth(depth: u32) -> Self {
        Self {
            depth: Some(depth),
            movetime: None,
        }
    }

    pub fn time(movetime: Duration) -> Self {
        Self {
            depth: None,
            movetime: Some(movetime),
        }
    }
}

/// One principal variation from a (multi-PV) analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variation {
    /// 1-based rank, best first
    pub multipv: u32,
    pub depth: u32,
    pub score: Option<Score>,
    pub pv: Vec<UciMove>,
}

/// An option advertised by the engine during the `uci` handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOption {
    pub name: String,
    pub kind: String,
    pub default: Option<String>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}
