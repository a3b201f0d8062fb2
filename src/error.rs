//! Error types for the weakfish library.
//!
//! This crate uses `thiserror` to provide a single enumeration of the
//! errors that may occur while parsing positions, validating requests,
//! or talking to the external UCI engine. The HTTP layer maps each
//! variant onto a status code; everything else just propagates it.

use shakmaty::uci::UciMove;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The request did not carry a position at all.
    #[error("No FEN provided")]
    MissingPosition,

    /// The provided FEN string could not be parsed.
    #[error("Invalid FEN: {0}")]
    InvalidFen(#[from] shakmaty::fen::ParseFenError),

    /// A parsed position is invalid from the perspective of `shakmaty`.
    #[error("Invalid Chess Position: {0}")]
    InvalidPosition(#[from] shakmaty::PositionError<shakmaty::Chess>),

    /// The requested rating lies outside the accepted domain.
    #[error("Rating {rating} out of range ({min}..={max})")]
    RatingOutOfRange { rating: i64, min: u32, max: u32 },

    /// The engine executable could not be started.
    #[error("Stockfish engine not available at {path}: {source}")]
    EngineUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to the engine process failed.
    #[error("Engine I/O error: {0}")]
    EngineIo(#[from] std::io::Error),

    /// The engine closed its output before answering.
    #[error("Engine process terminated unexpectedly")]
    EngineTerminated,

    /// The engine answered with something we could not make sense of.
    #[error("Engine protocol error: {0}")]
    Protocol(String),

    /// The engine suggested a move that is not legal in the position.
    #[error("Engine returned illegal move {0}")]
    IllegalMove(UciMove),

    /// No move could be produced even though the game is not over.
    #[error("Engine could not find a move")]
    NoMove,
}

impl Error {
    /// Whether the error was caused by the client's input rather than by
    /// the server or the engine.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingPosition
                | Error::InvalidFen(_)
                | Error::InvalidPosition(_)
                | Error::RatingOutOfRange { .. }
        )
    }

    /// Whether the engine process should be considered dead after this
    /// error, so that the next request spawns a fresh one.
    pub fn is_fatal_to_engine(&self) -> bool {
        matches!(self, Error::EngineIo(_) | Error::EngineTerminated)
    }
}
