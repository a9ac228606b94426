//! HTTP API for the game server.
//!
//! The engine is the single authority: every response carries a fresh
//! state snapshot and the browser is expected to render it as-is,
//! re-fetching after each request rather than tracking its own board.
//!
//! The un-prefixed routes serve the default session; the same
//! operations exist per session under `/sessions/{id}/`.

use crate::session::{SessionManager, DEFAULT_SESSION};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use derive_more::{Display, From};
use hanoi_engine::{Disk, GamePhase, PegId, Round, RoundController, RoundError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tower_http::cors::CorsLayer;
use tracing::{debug, instrument, warn};

/// Shared state for all handlers.
#[derive(Debug, Clone, derive_new::new)]
pub struct ApiState {
    sessions: SessionManager,
}

/// Builds the application router.
///
/// CORS is permissive: the browser client is served from a different
/// origin than the API.
pub fn router(state: ApiState) -> Router {
    let session_routes = Router::new()
        .route("/state", get(session_state))
        .route("/reset", post(session_reset))
        .route("/start", post(session_start))
        .route("/move", post(session_move))
        .route("/advance", post(session_advance));

    Router::new()
        .route("/health", get(health))
        .route("/state", get(default_state))
        .route("/reset", post(default_reset))
        .route("/start", post(default_start))
        .route("/move", post(default_move))
        .route("/advance", post(default_advance))
        .route("/sessions", get(list_sessions))
        .nest("/sessions/{id}", session_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Request to reset into a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetRequest {
    /// Round number, 1 through 3.
    pub round: u8,
}

/// Request to move the top disk of one peg onto another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Source peg letter (case-insensitive).
    pub from_peg: String,
    /// Destination peg letter (case-insensitive).
    pub to_peg: String,
}

/// Full game snapshot, the body of every successful response.
#[derive(Debug, Clone, Serialize)]
pub struct StateResponse {
    /// Peg name to disk sizes, bottom-to-top.
    pub pegs: BTreeMap<PegId, Vec<Disk>>,
    /// Active round number.
    pub round: Round,
    /// Disks in play this round.
    pub disk_count: u8,
    /// Lifecycle phase.
    pub phase: GamePhase,
    /// Whole seconds since `start`, frozen once won.
    pub elapsed_seconds: u64,
    /// Successful moves since the last reset.
    pub move_count: u32,
    /// Minimum legal moves for this round.
    pub minimum_moves: u64,
}

impl StateResponse {
    fn from_game(game: &RoundController) -> Self {
        Self {
            pegs: game
                .board()
                .pegs()
                .map(|(id, peg)| (id, peg.disks().to_vec()))
                .collect(),
            round: game.round(),
            disk_count: game.board().disk_count(),
            phase: game.phase(),
            elapsed_seconds: game.elapsed().as_secs(),
            move_count: game.move_count(),
            minimum_moves: game.minimum_moves(),
        }
    }
}

/// A rejected request, mapped onto a 4xx JSON body.
#[derive(Debug, Display, From)]
pub enum ApiError {
    /// The controller or engine refused the operation.
    #[display("{}", _0)]
    #[from]
    Round(RoundError),

    /// A peg name on the wire was not `A`, `B`, or `C`.
    #[display("Unknown peg {:?}, pegs are A, B, and C", _0)]
    UnknownPeg(String),
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Round(inner) => Some(inner),
            ApiError::UnknownPeg(_) => None,
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            // The request is well-formed but arrived in the wrong
            // phase; the client can retry after start/reset/advance.
            ApiError::Round(
                RoundError::GameNotStarted | RoundError::RoundNotWon | RoundError::RoundOver,
            ) => StatusCode::CONFLICT,
            ApiError::Round(_) | ApiError::UnknownPeg(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Round(err) => err.kind(),
            ApiError::UnknownPeg(_) => "unknown_peg",
        }
    }
}

/// Wire form of an [`ApiError`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable snake_case kind for client-side phrasing.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(kind = self.kind(), message = %self, "Request rejected");
        let body = ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

fn parse_peg(name: &str) -> Result<PegId, ApiError> {
    name.parse()
        .map_err(|_| ApiError::UnknownPeg(name.to_string()))
}

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip(state))]
async fn list_sessions(State(state): State<ApiState>) -> Json<Vec<String>> {
    Json(state.sessions.list_sessions())
}

// ─────────────────────────────────────────────────────────────
//  Session-scoped operations
// ─────────────────────────────────────────────────────────────

#[instrument(skip(state), fields(session_id = %id))]
fn snapshot(state: &ApiState, id: &str) -> Json<StateResponse> {
    let snapshot = state
        .sessions
        .with_session(id, |session| StateResponse::from_game(session.game()));
    Json(snapshot)
}

#[instrument(skip(state), fields(session_id = %id, round = req.round))]
fn reset(state: &ApiState, id: &str, req: &ResetRequest) -> Result<Json<StateResponse>, ApiError> {
    let round = Round::try_from(req.round)?;
    let snapshot = state.sessions.with_session(id, |session| {
        session.game_mut().reset(round);
        StateResponse::from_game(session.game())
    });
    Ok(Json(snapshot))
}

#[instrument(skip(state), fields(session_id = %id))]
fn start(state: &ApiState, id: &str) -> Json<StateResponse> {
    let snapshot = state.sessions.with_session(id, |session| {
        session.game_mut().start();
        StateResponse::from_game(session.game())
    });
    Json(snapshot)
}

#[instrument(skip(state), fields(session_id = %id, from = %req.from_peg, to = %req.to_peg))]
fn attempt_move(
    state: &ApiState,
    id: &str,
    req: &MoveRequest,
) -> Result<Json<StateResponse>, ApiError> {
    let from = parse_peg(&req.from_peg)?;
    let to = parse_peg(&req.to_peg)?;

    let snapshot = state.sessions.with_session(id, |session| {
        session.game_mut().attempt_move(from, to)?;
        debug!(phase = %session.game().phase(), "Move accepted");
        Ok::<_, RoundError>(StateResponse::from_game(session.game()))
    })?;
    Ok(Json(snapshot))
}

#[instrument(skip(state), fields(session_id = %id))]
fn advance(state: &ApiState, id: &str) -> Result<Json<StateResponse>, ApiError> {
    let snapshot = state.sessions.with_session(id, |session| {
        let next = session.game_mut().advance()?;
        debug!(round = %next, "Advanced to next round");
        Ok::<_, RoundError>(StateResponse::from_game(session.game()))
    })?;
    Ok(Json(snapshot))
}

// ─────────────────────────────────────────────────────────────
//  Route handlers: default session and /sessions/{id}
// ─────────────────────────────────────────────────────────────

async fn default_state(State(state): State<ApiState>) -> Json<StateResponse> {
    snapshot(&state, DEFAULT_SESSION)
}

async fn default_reset(
    State(state): State<ApiState>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<StateResponse>, ApiError> {
    reset(&state, DEFAULT_SESSION, &req)
}

async fn default_start(State(state): State<ApiState>) -> Json<StateResponse> {
    start(&state, DEFAULT_SESSION)
}

async fn default_move(
    State(state): State<ApiState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<StateResponse>, ApiError> {
    attempt_move(&state, DEFAULT_SESSION, &req)
}

async fn default_advance(State(state): State<ApiState>) -> Result<Json<StateResponse>, ApiError> {
    advance(&state, DEFAULT_SESSION)
}

async fn session_state(State(state): State<ApiState>, Path(id): Path<String>) -> Json<StateResponse> {
    snapshot(&state, &id)
}

async fn session_reset(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<StateResponse>, ApiError> {
    reset(&state, &id, &req)
}

async fn session_start(State(state): State<ApiState>, Path(id): Path<String>) -> Json<StateResponse> {
    start(&state, &id)
}

async fn session_move(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<StateResponse>, ApiError> {
    attempt_move(&state, &id, &req)
}

async fn session_advance(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<StateResponse>, ApiError> {
    advance(&state, &id)
}
