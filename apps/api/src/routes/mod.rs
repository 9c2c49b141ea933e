pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::game::handlers as game_handlers;
use crate::state::AppState;
use crate::statements::handlers as statement_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Statements API — stateless one-shot generation
        .route(
            "/api/v1/statements/generate",
            post(statement_handlers::handle_generate),
        )
        // Games API — session-scoped rounds
        .route("/api/v1/games", post(game_handlers::handle_create_game))
        .route("/api/v1/games/:id", get(game_handlers::handle_get_game))
        .route(
            "/api/v1/games/:id/generate",
            post(game_handlers::handle_generate),
        )
        .route(
            "/api/v1/games/:id/assessments",
            post(game_handlers::handle_assess),
        )
        .route("/api/v1/games/:id/reveal", post(game_handlers::handle_reveal))
        .route("/api/v1/games/:id/reset", post(game_handlers::handle_reset))
        .with_state(state)
}
