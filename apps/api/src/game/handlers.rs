//! Axum route handlers for the Games API.
//!
//! Thin adapters: every handler maps one HTTP call onto one state machine
//! transition and returns a full snapshot. Truth labels are withheld from
//! snapshots until the round is `Revealed`, so a browser client cannot read
//! the answers out of the wire format mid-round.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::game::sessions::GameSession;
use crate::game::state::GamePhase;
use crate::game::stats::{self, GameStats};
use crate::state::AppState;
use crate::statements::generator::{generate, validate_request, GenerationRequest};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    pub game_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    pub index: usize,
    pub guess: bool,
}

/// A statement as seen by the client. `is_true` is present only once the
/// round is revealed.
#[derive(Debug, Serialize)]
pub struct StatementView {
    pub text: String,
    #[serde(rename = "isTrue", skip_serializing_if = "Option::is_none")]
    pub is_true: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct GameSnapshot {
    pub game_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub phase: GamePhase,
    pub statements: Vec<StatementView>,
    pub assessments: BTreeMap<usize, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub stats: GameStats,
}

fn snapshot(game_id: Uuid, session: &GameSession) -> GameSnapshot {
    let revealed = session.state.phase() == GamePhase::Revealed;
    let statements = session
        .state
        .statements()
        .iter()
        .map(|s| StatementView {
            text: s.text.clone(),
            is_true: revealed.then_some(s.is_true),
        })
        .collect();

    GameSnapshot {
        game_id,
        created_at: session.created_at,
        phase: session.state.phase(),
        statements,
        assessments: session.state.assessments().clone(),
        error: session.state.error().map(|e| e.to_string()),
        stats: stats::compute(&session.state),
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Game {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/games
///
/// Creates an empty session in `Idle`.
pub async fn handle_create_game(State(state): State<AppState>) -> Json<CreateGameResponse> {
    let game_id = state.games.create();
    let created_at = state
        .games
        .with_session(game_id, |s| s.created_at)
        .unwrap_or_else(Utc::now);

    tracing::info!("Created game {game_id}");

    Json(CreateGameResponse {
        game_id,
        created_at,
    })
}

/// GET /api/v1/games/:id
pub async fn handle_get_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameSnapshot>, AppError> {
    state
        .games
        .with_session(game_id, |s| snapshot(game_id, s))
        .map(Json)
        .ok_or_else(|| session_not_found(game_id))
}

/// POST /api/v1/games/:id/generate
///
/// Drives a full round start: `request_generation` → provider call →
/// `generation_succeeded` / `generation_failed`. The `Loading` phase is the
/// mutual-exclusion guard — a second request while one is in flight gets 409.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GameSnapshot>, AppError> {
    // Reject bad input before touching the phase, so a typo'd topic does not
    // tear down a revealed round.
    validate_request(&request)?;

    let seq = state
        .games
        .with_session(game_id, |s| s.state.request_generation())
        .ok_or_else(|| session_not_found(game_id))?
        .ok_or_else(|| {
            AppError::Conflict("A round is already loading or in play; reset first".to_string())
        })?;

    // The sole suspension point. The session lock is not held across it.
    match generate(&request, state.completer.as_ref()).await {
        Ok(result) => {
            state.games.with_session(game_id, |s| {
                s.state.generation_succeeded(seq, result.statements);
            });
        }
        Err(e) => {
            state.games.with_session(game_id, |s| {
                s.state.generation_failed(seq, e.to_string());
            });
            return Err(e.into());
        }
    }

    state
        .games
        .with_session(game_id, |s| snapshot(game_id, s))
        .map(Json)
        .ok_or_else(|| session_not_found(game_id))
}

/// POST /api/v1/games/:id/assessments
///
/// Upserts one guess. Outside `Active` (or out of range) the transition is a
/// no-op by design — the snapshot tells the client what actually happened.
pub async fn handle_assess(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<AssessRequest>,
) -> Result<Json<GameSnapshot>, AppError> {
    state
        .games
        .with_session(game_id, |s| {
            s.state.assess(request.index, request.guess);
            snapshot(game_id, s)
        })
        .map(Json)
        .ok_or_else(|| session_not_found(game_id))
}

/// POST /api/v1/games/:id/reveal
pub async fn handle_reveal(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameSnapshot>, AppError> {
    state
        .games
        .with_session(game_id, |s| {
            s.state.reveal();
            snapshot(game_id, s)
        })
        .map(Json)
        .ok_or_else(|| session_not_found(game_id))
}

/// POST /api/v1/games/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameSnapshot>, AppError> {
    state
        .games
        .with_session(game_id, |s| {
            s.state.reset();
            snapshot(game_id, s)
        })
        .map(Json)
        .ok_or_else(|| session_not_found(game_id))
}
