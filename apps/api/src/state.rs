use std::sync::Arc;

use crate::game::sessions::GameSessions;
use crate::llm_client::TextCompleter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The opaque text-completion provider. Trait object so tests can swap
    /// in a canned completer without touching handler code.
    pub completer: Arc<dyn TextCompleter>,
    pub games: GameSessions,
}
