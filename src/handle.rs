use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::{
    engine::{Analyzer, UciEngine},
    error::Error,
};

type Factory = Box<dyn Fn() -> Result<Box<dyn Analyzer>, Error> + Send + Sync>;

/// Process-wide access to one lazily started engine.
///
/// The engine is created on first use and kept for the life of the
/// process. Callers get exclusive access for the duration of a closure, so
/// commands from concurrent requests never interleave on the engine's pipe.
/// If a call fails in a way that leaves the process unusable, the engine is
/// dropped and the next caller starts a fresh one.
pub struct EngineHandle {
    factory: Factory,
    slot: Mutex<Option<Box<dyn Analyzer>>>,
}

impl EngineHandle {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Analyzer>, Error> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            slot: Mutex::new(None),
        }
    }

    /// Handle for the UCI executable at `path`.
    pub fn uci(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(move || Ok(Box::new(UciEngine::spawn(&path)?) as Box<dyn Analyzer>))
    }

    fn lock(&self) -> MutexGuard<'_, Option<Box<dyn Analyzer>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_started(&self) -> bool {
        self.lock().is_some()
    }

    /// Run `f` with exclusive access to the engine, starting it if needed.
    pub fn with<T>(
        &self,
        f: impl FnOnce(&mut dyn Analyzer) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut slot = self.lock();
        let engine = match slot.take() {
            Some(engine) => engine,
            None => (self.factory)()?,
        };
        let engine = slot.insert(engine);

        let result = f(engine.as_mut());
        if let Err(err) = &result {
            if err.is_fatal_to_engine() {
                warn!(%err, "discarding engine");
                *slot = None;
            }
        }
        result
    }

    /// Stop the engine if it was started. Safe to call more than once.
    pub fn shutdown(&self) {
        if let Some(mut engine) = self.lock().take() {
            match engine.quit() {
                Ok(()) => info!("engine shut down"),
                Err(err) => warn!(%err, "engine did not shut down cleanly"),
            }
        }
    }
}
