use std::sync::{Arc, Mutex};

use axum::{Router, body::Body, http::Request};
use serde_json::Value;
use tower::ServiceExt;
use weakfish::{
    Analyzer, EngineHandle, Error, Limit, Score, Variation,
    game::TurnSettings,
    server,
    shakmaty::{Chess, uci::UciMove},
};

/// Engine that always likes the same moves.
#[derive(Clone, Default)]
pub struct FakeEngine {
    pub lines: Vec<&'static str>,
    pub best: Option<&'static str>,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl Analyzer for FakeEngine {
    fn configure(&mut self, options: &[(&str, String)]) -> Result<(), Error> {
        let mut log = self.log.lock().unwrap();
        for (name, value) in options {
            log.push(format!("setoption {name}={value}"));
        }
        Ok(())
    }

    fn analyze(
        &mut self,
        _position: &Chess,
        limit: Limit,
        multipv: u32,
    ) -> Result<Vec<Variation>, Error> {
        self.log
            .lock()
            .unwrap()
            .push(format!("analyze depth={:?} multipv={multipv}", limit.depth));
        if self.lines.is_empty() {
            return Ok(vec![Variation {
                multipv: 1,
                depth: 8,
                score: Some(Score::Cp(30)),
                pv: Vec::new(),
            }]);
        }
        Ok(self
            .lines
            .iter()
            .enumerate()
            .map(|(i, mv)| Variation {
                multipv: i as u32 + 1,
                depth: 8,
                score: Some(Score::Cp(30 - 20 * i as i32)),
                pv: vec![mv.parse::<UciMove>().unwrap()],
            })
            .collect())
    }

    fn play(&mut self, _position: &Chess, _limit: Limit) -> Result<Option<UciMove>, Error> {
        self.log.lock().unwrap().push("play".to_string());
        Ok(self.best.map(|mv| mv.parse().unwrap()))
    }
}

pub fn app_with(engine: FakeEngine) -> Router {
    let handle = EngineHandle::new(move || Ok(Box::new(engine.clone()) as Box<dyn Analyzer>));
    server::router(Arc::new(handle), TurnSettings::default())
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (u16, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status().as_u16();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    (status, body)
}
