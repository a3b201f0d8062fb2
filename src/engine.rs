use std::{
    io::{BufRead, BufReader, Write},
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
};

use shakmaty::{Chess, EnPassantMode, fen::Fen, uci::UciMove};
use tracing::{debug, info};

use crate::{
    error::Error,
    types::{EngineOption, Limit, Variation},
    uci,
};

/// The operations the move selection and request handling code need from
/// an analysis engine.
///
/// All calls block until the engine has answered within the given limit.
pub trait Analyzer: Send {
    /// Set engine options, e.g. `UCI_LimitStrength` and `UCI_Elo`.
    fn configure(&mut self, options: &[(&str, String)]) -> Result<(), Error>;

    /// Analyse `position`, returning up to `multipv` variations ordered best
    /// first.
    fn analyze(
        &mut self,
        position: &Chess,
        limit: Limit,
        multipv: u32,
    ) -> Result<Vec<Variation>, Error>;

    /// Ask for the engine's move. `None` when it reports no legal move.
    fn play(&mut self, position: &Chess, limit: Limit) -> Result<Option<UciMove>, Error>;

    /// Options the engine advertised, if it advertises any.
    fn options(&self) -> &[EngineOption] {
        &[]
    }

    /// Shut the engine down. Further calls are not expected.
    fn quit(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

pub(crate) fn fen_of(position: &Chess) -> String {
    Fen::from_position(position, EnPassantMode::Legal).to_string()
}

/// A UCI engine running as a child process.
pub struct UciEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    name: Option<String>,
    options: Vec<EngineOption>,
    multipv: u32,
    closed: bool,
}

impl UciEngine {
    /// Start the executable at `path` and complete the `uci` handshake.
    pub fn spawn(path: &str) -> Result<Self, Error> {
        let mut process = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::EngineUnavailable {
                path: path.to_string(),
                source,
            })?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| Error::Protocol("engine stdin unavailable".to_string()))?;
        let stdout = BufReader::new(
            process
                .stdout
                .take()
                .ok_or_else(|| Error::Protocol("engine stdout unavailable".to_string()))?,
        );

        let mut engine = Self {
            process,
            stdin,
            stdout,
            name: None,
            options: Vec::new(),
            multipv: 1,
            closed: false,
        };
        engine.handshake()?;

        info!(
            engine = engine.name.as_deref().unwrap_or(path),
            options = engine.options.len(),
            "engine started"
        );
        Ok(engine)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn handshake(&mut self) -> Result<(), Error> {
        self.send("uci")?;
        loop {
            let line = self.read_line()?;
            if line == "uciok" {
                break;
            } else if let Some(name) = line.strip_prefix("id name ") {
                self.name = Some(name.to_string());
            } else if let Some(option) = uci::parse_option(&line) {
                self.options.push(option);
            }
        }
        self.sync()
    }

    fn send(&mut self, command: &str) -> Result<(), Error> {
        debug!(">> {command}");
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, Error> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(Error::EngineTerminated);
        }
        let line = line.trim().to_string();
        debug!("<< {line}");
        Ok(line)
    }

    /// `isready` / `readyok` round trip.
    fn sync(&mut self) -> Result<(), Error> {
        self.send("isready")?;
        while self.read_line()? != "readyok" {}
        Ok(())
    }

    fn set_multipv(&mut self, multipv: u32) -> Result<(), Error> {
        if multipv != self.multipv {
            self.send(&uci::setoption_command("MultiPV", &multipv.to_string()))?;
            self.multipv = multipv;
        }
        Ok(())
    }

    fn start_search(&mut self, position: &Chess, limit: &Limit) -> Result<(), Error> {
        self.send(&format!("position fen {}", fen_of(position)))?;
        self.send(&uci::go_command(limit))
    }
}

impl Analyzer for UciEngine {
    fn configure(&mut self, options: &[(&str, String)]) -> Result<(), Error> {
        for (name, value) in options {
            self.send(&uci::setoption_command(name, value))?;
        }
        self.sync()
    }

    fn analyze(
        &mut self,
        position: &Chess,
        limit: Limit,
        multipv: u32,
    ) -> Result<Vec<Variation>, Error> {
        self.set_multipv(multipv.max(1))?;
        self.start_search(position, &limit)?;

        // Keep the deepest report for each rank.
        let mut lines: Vec<Variation> = Vec::new();
        loop {
            let line = self.read_line()?;
            if line.starts_with("bestmove") {
                break;
            }
            if let Some(variation) = uci::parse_info(&line) {
                match lines.iter_mut().find(|v| v.multipv == variation.multipv) {
                    Some(existing) => *existing = variation,
                    None => lines.push(variation),
                }
            }
        }

        lines.sort_by_key(|v| v.multipv);
        debug!(
            lines = lines.len(),
            depth = lines.first().map_or(0, |v| v.depth),
            "analysis finished"
        );
        Ok(lines)
    }

    fn play(&mut self, position: &Chess, limit: Limit) -> Result<Option<UciMove>, Error> {
        self.set_multipv(1)?;
        self.start_search(position, &limit)?;
        loop {
            let line = self.read_line()?;
            if line.starts_with("bestmove") {
                return uci::parse_bestmove(&line);
            }
        }
    }

    fn options(&self) -> &[EngineOption] {
        &self.options
    }

    fn quit(&mut self) -> Result<(), Error> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        // The pipe may already be gone if the engine crashed.
        let _ = self.send("quit");
        self.process.wait()?;
        info!("engine stopped");
        Ok(())
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.quit();
        }
    }
}
