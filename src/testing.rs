use std::sync::{Arc, Mutex};

use shakmaty::{Chess, uci::UciMove};

use crate::{
    engine::Analyzer,
    error::Error,
    types::{EngineOption, Limit, Score, Variation},
};

/// In-memory engine returning canned answers and recording every call.
#[derive(Clone, Default)]
pub(crate) struct ScriptedEngine {
    /// First moves of the multi-PV lines, best first.
    pub candidates: Vec<&'static str>,
    pub best: Option<&'static str>,
    pub score: Option<Score>,
    pub analyze_fails: bool,
    pub play_fails: bool,
    pub options: Vec<EngineOption>,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl ScriptedEngine {
    pub fn with_candidates(candidates: &[&'static str]) -> Self {
        Self {
            candidates: candidates.to_vec(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.log.lock().unwrap().push(call);
    }
}

fn describe(limit: &Limit) -> String {
    match (limit.depth, limit.movetime) {
        (Some(d), _) => format!("depth={d}"),
        (None, Some(t)) => format!("movetime={}", t.as_millis()),
        (None, None) => "unlimited".to_string(),
    }
}

impl Analyzer for ScriptedEngine {
    fn configure(&mut self, options: &[(&str, String)]) -> Result<(), Error> {
        for (name, value) in options {
            self.record(format!("setoption {name}={value}"));
        }
        Ok(())
    }

    fn analyze(
        &mut self,
        _position: &Chess,
        limit: Limit,
        multipv: u32,
    ) -> Result<Vec<Variation>, Error> {
        self.record(format!("analyze {} multipv={multipv}", describe(&limit)));
        if self.analyze_fails {
            return Err(Error::Protocol("scripted analyze failure".to_string()));
        }
        let score = Some(self.score.unwrap_or(Score::Cp(25)));
        if self.candidates.is_empty() {
            return Ok(vec![Variation {
                multipv: 1,
                depth: limit.depth.unwrap_or(10),
                score,
                pv: Vec::new(),
            }]);
        }
        Ok(self
            .candidates
            .iter()
            .take(multipv as usize)
            .enumerate()
            .map(|(i, mv)| Variation {
                multipv: i as u32 + 1,
                depth: limit.depth.unwrap_or(10),
                score: if i == 0 { score } else { Some(Score::Cp(-10 * i as i32)) },
                pv: vec![mv.parse::<UciMove>().unwrap()],
            })
            .collect())
    }

    fn play(&mut self, _position: &Chess, limit: Limit) -> Result<Option<UciMove>, Error> {
        self.record(format!("play {}", describe(&limit)));
        if self.play_fails {
            return Err(Error::EngineTerminated);
        }
        Ok(self.best.map(|mv| mv.parse().unwrap()))
    }

    fn options(&self) -> &[EngineOption] {
        &self.options
    }
}
