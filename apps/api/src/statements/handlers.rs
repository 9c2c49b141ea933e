//! Axum route handlers for the Statements API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::statements::generator::{
    generate, GenerationRequest, GenerationResult, WitnessStatement,
};

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub statements: Vec<WitnessStatement>,
}

/// POST /api/v1/statements/generate
///
/// Stateless one-shot generation: validates the request, makes the single
/// provider call, and returns the validated statement list with its truth
/// labels. Callers that want masking and scoring should use the Games API.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let GenerationResult { statements } = generate(&request, state.completer.as_ref()).await?;

    Ok(Json(GenerateResponse { statements }))
}
