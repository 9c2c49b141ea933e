//! Statement Generator — builds the generation prompt, makes the single
//! provider call, and validates the reply into a typed statement list.
//!
//! Flow: validate_request → render prompt → TextCompleter::complete →
//!       strip fences → parse + shape-check → count check.
//!
//! No retries, no streaming, no partial results: one call, accepted whole or
//! rejected whole. A garbled statement list is never returned to callers.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{strip_json_fences, CompletionError, TextCompleter};
use crate::statements::prompts::{STATEMENTS_PROMPT_TEMPLATE, STATEMENTS_SYSTEM};

/// Topic length bounds — short topics produce degenerate prompts,
/// long ones are almost always paste errors.
pub const MIN_TOPIC_CHARS: usize = 10;
pub const MAX_TOPIC_CHARS: usize = 150;

/// Statement count bounds supported by the game board.
pub const MIN_STATEMENTS: u32 = 4;
pub const MAX_STATEMENTS: u32 = 12;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A single claim shown to the player, paired with its provider-asserted
/// truth label. The label is set here and never mutated afterwards.
///
/// `isTrue` is provider-asserted, not externally verified — the game tracks
/// agreement between the player's guess and the label, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessStatement {
    pub text: String,
    #[serde(rename = "isTrue")]
    pub is_true: bool,
}

/// Input to a generation call.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub num_statements: u32,
}

/// Output of a successful generation call. Fully replaces any prior result;
/// results are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub statements: Vec<WitnessStatement>,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Provider call failed: {0}")]
    Provider(String),

    #[error("Provider call timed out")]
    Timeout,

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Provider returned {actual} statements, requested {requested}")]
    CountMismatch { requested: u32, actual: usize },
}

impl From<CompletionError> for GenerationError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::Timeout => GenerationError::Timeout,
            CompletionError::EmptyContent => {
                GenerationError::MalformedResponse("empty completion".to_string())
            }
            other => GenerationError::Provider(other.to_string()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// Local, synchronous input validation. Runs before any network call —
/// a rejected request never reaches the provider.
pub fn validate_request(request: &GenerationRequest) -> Result<(), GenerationError> {
    let topic_len = request.topic.trim().chars().count();
    if topic_len < MIN_TOPIC_CHARS {
        return Err(GenerationError::InvalidRequest(format!(
            "topic must be at least {MIN_TOPIC_CHARS} characters"
        )));
    }
    if topic_len > MAX_TOPIC_CHARS {
        return Err(GenerationError::InvalidRequest(format!(
            "topic must be at most {MAX_TOPIC_CHARS} characters"
        )));
    }
    if !(MIN_STATEMENTS..=MAX_STATEMENTS).contains(&request.num_statements) {
        return Err(GenerationError::InvalidRequest(format!(
            "num_statements must be between {MIN_STATEMENTS} and {MAX_STATEMENTS}"
        )));
    }
    Ok(())
}

/// Deterministically renders the generation prompt for a validated request.
pub fn render_prompt(request: &GenerationRequest) -> String {
    STATEMENTS_PROMPT_TEMPLATE
        .replace("{num_statements}", &request.num_statements.to_string())
        .replace("{topic}", request.topic.trim())
}

/// Parses and shape-checks a raw provider reply.
///
/// serde does the type enforcement: a string `"true"` where a boolean is
/// required fails deserialization rather than being coerced. Empty statement
/// text is also rejected — a blank card is a contract violation.
fn parse_result(raw: &str) -> Result<GenerationResult, GenerationError> {
    let text = strip_json_fences(raw);

    let result: GenerationResult = serde_json::from_str(text)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    if let Some(i) = result.statements.iter().position(|s| s.text.trim().is_empty()) {
        return Err(GenerationError::MalformedResponse(format!(
            "statement {i} has empty text"
        )));
    }

    Ok(result)
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full generation contract against an opaque text completer.
///
/// Count policy is STRICT: a reply whose statement count differs from the
/// request fails with `CountMismatch` instead of being trusted as-is. This
/// keeps the game's progress denominator equal to what the player asked for.
///
/// An all-true or all-false set is accepted but logged — the round is
/// playable, just not much of a puzzle.
pub async fn generate(
    request: &GenerationRequest,
    completer: &dyn TextCompleter,
) -> Result<GenerationResult, GenerationError> {
    validate_request(request)?;

    let prompt = render_prompt(request);
    let raw = completer.complete(&prompt, STATEMENTS_SYSTEM).await?;

    let result = parse_result(&raw)?;

    if result.statements.len() != request.num_statements as usize {
        return Err(GenerationError::CountMismatch {
            requested: request.num_statements,
            actual: result.statements.len(),
        });
    }

    let true_count = result.statements.iter().filter(|s| s.is_true).count();
    if true_count == 0 || true_count == result.statements.len() {
        warn!(
            "Degenerate statement set for topic '{}': {}/{} true",
            request.topic.trim(),
            true_count,
            result.statements.len()
        );
    }

    info!(
        "Generated {} statements ({} true) for topic '{}'",
        result.statements.len(),
        true_count,
        request.topic.trim()
    );

    Ok(result)
}
