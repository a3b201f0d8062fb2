use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::Error,
    game::{Turn, TurnSettings, parse_position, play_turn},
    handle::EngineHandle,
    strength::Rating,
};

#[derive(Clone)]
pub struct AppState {
    engine: Arc<EngineHandle>,
    settings: TurnSettings,
}

/// Body of `POST /move`. The browser client posts `fen` and `elo`.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    #[serde(alias = "fen")]
    pub position: Option<String>,
    #[serde(alias = "elo")]
    pub rating: Option<i64>,
}

pub fn router(engine: Arc<EngineHandle>, settings: TurnSettings) -> Router {
    let state = AppState { engine, settings };

    Router::new()
        .route("/move", post(make_move))
        .route("/reset", post(reset))
        .with_state(state)
}

/// Error body `{ "error": ... }` with a matching status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, "{}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

async fn make_move(
    State(state): State<AppState>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<Turn>, ApiError> {
    let Json(request) = payload?;

    let position = parse_position(request.position.as_deref())?;
    let rating = request
        .rating
        .map(Rating::new)
        .transpose()?
        .unwrap_or_default();

    info!(rating = rating.get(), "move requested");

    // Engine calls block until the engine answers.
    let turn = tokio::task::spawn_blocking(move || {
        play_turn(
            &state.engine,
            position,
            rating,
            &state.settings,
            &mut rand::rng(),
        )
    })
    .await
    .map_err(|err| ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: err.to_string(),
    })??;

    Ok(Json(turn))
}

/// Game state lives in the client; nothing to clear here.
async fn reset() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
