//! Play chess against a UCI engine at a chosen rating.
//!
//!
//! This crate drives an external UCI engine (typically Stockfish) and
//! turns it into an opponent of configurable strength. From 1350 upwards
//! the engine's own `UCI_Elo` limiter does the work. Below that, the
//! [`policy`] module simulates weaker players: random moves with a taste
//! for captures and checks under 600, and shallow multi-PV searches with
//! deliberate blunders between 600 and 1350.
//!
//! The principal entry points are [`EngineHandle`], which owns the single
//! long-lived engine process, and [`game::play_turn`], which evaluates a
//! position, replies at the requested strength and evaluates the result.
//! [`server::router`] exposes that turn as `POST /move`.
//!
//! The library re‑exports `shakmaty` to make position construction easy.

pub mod config;
pub mod engine;
mod error;
pub mod game;
mod handle;
pub mod moves;
pub mod policy;
pub mod server;
pub mod strength;
mod types;
pub mod uci;

#[cfg(test)]
mod testing;

/// Engine abstraction and the UCI subprocess implementation.
pub use engine::{Analyzer, UciEngine};

/// Shared, lazily started engine.
pub use handle::EngineHandle;

/// Error type produced by library operations.
pub use error::Error;

/// Scores, search limits and engine reports.
pub use types::{EngineOption, Evaluation, Limit, Score, Variation};

/// Validated rating and its band.
pub use strength::{Band, Rating};

/// Re-export of `shakmaty` for convenience when building positions.
pub use shakmaty;
